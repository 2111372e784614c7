//! SQLite storage bootstrap for the notes database.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the application.
//! - Ensure the `notes` schema exists before any data access.
//! - Resolve and create the per-OS application data directory.
//!
//! # Invariants
//! - Schema creation is idempotent and safe to run on every startup.
//! - Core code must not read/write application data before bootstrap
//!   succeeds.
//! - Any bootstrap failure is fatal to startup; nothing retries.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod init;
mod open;

pub use init::{database_path, initialize, DB_FILE_NAME};
pub use open::{open_db, open_db_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Startup-time storage failure. All variants are fatal; the process has no
/// degraded mode.
#[derive(Debug)]
pub enum StorageError {
    /// No home or platform data directory could be determined.
    DataDirUnavailable,
    /// The data directory could not be created.
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The database file could not be opened or configured.
    Connection(rusqlite::Error),
    /// The schema statement failed.
    Schema(rusqlite::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataDirUnavailable => {
                write!(f, "no usable application data directory on this platform")
            }
            Self::Directory { path, source } => {
                write!(
                    f,
                    "failed to create data directory `{}`: {source}",
                    path.display()
                )
            }
            Self::Connection(err) => write!(f, "failed to open notes database: {err}"),
            Self::Schema(err) => write!(f, "failed to ensure notes schema: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DataDirUnavailable => None,
            Self::Directory { source, .. } => Some(source),
            Self::Connection(err) => Some(err),
            Self::Schema(err) => Some(err),
        }
    }
}
