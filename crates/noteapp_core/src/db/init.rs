//! Startup storage initializer.
//!
//! # Responsibility
//! - Resolve the application data directory and create it when absent.
//! - Open `notes.db` inside that directory with the schema ensured.
//!
//! # Invariants
//! - Called once per process startup; every call is independent and
//!   idempotent on an existing store.
//! - The first failure propagates; no partial-state recovery is attempted.

use super::{open_db, StorageError, StorageResult};
use crate::data_dir::DataDirResolver;
use log::{error, info};
use rusqlite::Connection;
use std::path::PathBuf;

/// Database file name inside the application data directory.
pub const DB_FILE_NAME: &str = "notes.db";

/// Returns the full path of the notes database for `app_name`.
///
/// Resolution only; nothing is created on disk.
pub fn database_path(
    resolver: &dyn DataDirResolver,
    app_name: &str,
) -> StorageResult<PathBuf> {
    Ok(resolver.resolve(app_name)?.join(DB_FILE_NAME))
}

/// Resolves the data directory, creates it, and opens the notes database.
///
/// # Side effects
/// - Creates the directory tree and the database file when absent.
/// - Emits `storage_init` logging events with status and db path.
pub fn initialize(
    resolver: &dyn DataDirResolver,
    app_name: &str,
) -> StorageResult<Connection> {
    let data_dir = resolver.resolve(app_name)?;

    if let Err(source) = std::fs::create_dir_all(&data_dir) {
        let err = StorageError::Directory {
            path: data_dir,
            source,
        };
        error!("event=storage_init module=db status=error error={err}");
        return Err(err);
    }

    let db_path = data_dir.join(DB_FILE_NAME);
    info!(
        "event=storage_init module=db status=start db_path={}",
        db_path.display()
    );

    match open_db(&db_path) {
        Ok(conn) => {
            info!(
                "event=storage_init module=db status=ok db_path={}",
                db_path.display()
            );
            Ok(conn)
        }
        Err(err) => {
            error!("event=storage_init module=db status=error error={err}");
            Err(err)
        }
    }
}
