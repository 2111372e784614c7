//! Core domain logic for NoteApp.
//! This crate is the single source of truth for note persistence invariants.

pub mod data_dir;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use data_dir::{DataDirResolver, FixedDataDir, PlatformDataDir};
pub use db::{database_path, initialize, open_db, open_db_in_memory, StorageError, DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{unix_now, Note, NoteId};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
