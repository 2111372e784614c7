//! FFI use-case API for the UI host.
//!
//! # Responsibility
//! - Expose storage bootstrap and the five note operations as sync calls.
//! - Hold the single shared database connection for the process lifetime.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The connection is opened once by `init_app` and serialized behind a
//!   mutex afterwards.

use noteapp_core::{
    core_version as core_version_inner, database_path, init_logging as init_logging_inner,
    initialize, ping as ping_inner, DataDirResolver, FixedDataDir, Note, NoteService,
    NoteServiceError, PlatformDataDir, SqliteNoteRepository,
};
use log::{error, info};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

/// Environment override for the data base directory, used by tests and
/// portable installs.
const DATA_DIR_ENV: &str = "NOTEAPP_DATA_DIR";

static APP_DB: OnceLock<Mutex<Connection>> = OnceLock::new();
static APP_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for host smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for a repeated identical configuration.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Note record crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    /// Stable note ID in string form.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Creation time in Unix seconds.
    pub created_at: i64,
    /// Last modification time in Unix seconds.
    pub updated_at: i64,
}

impl From<Note> for NoteItem {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Response envelope for startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInitResponse {
    /// Whether storage is ready.
    pub ok: bool,
    /// Full path of the notes database when ready.
    pub db_path: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Response envelope for single-note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// The affected note on success.
    pub note: Option<NoteItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteResponse {
    fn success(message: impl Into<String>, note: Note) -> Self {
        Self {
            ok: true,
            note: Some(note.into()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note: None,
            message: message.into(),
        }
    }
}

/// Response envelope for the list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Notes ordered newest-modified first (empty on failure).
    pub items: Vec<NoteItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Response envelope for operations without a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Opens the notes database for `app_name` and parks the connection for the
/// process lifetime.
///
/// # FFI contract
/// - Sync call, file-system and DB setup work.
/// - Idempotent; repeated calls after success report the existing store.
/// - Never panics; startup failures arrive as failure envelopes.
#[flutter_rust_bridge::frb(sync)]
pub fn init_app(app_name: String) -> AppInitResponse {
    if let Some(path) = APP_DB_PATH.get() {
        return AppInitResponse {
            ok: true,
            db_path: Some(path.display().to_string()),
            message: "Storage already initialized.".to_string(),
        };
    }

    let resolver = active_resolver();
    let db_path = match database_path(resolver.as_ref(), &app_name) {
        Ok(path) => path,
        Err(err) => {
            return AppInitResponse {
                ok: false,
                db_path: None,
                message: format!("init_app failed: {err}"),
            }
        }
    };

    match initialize(resolver.as_ref(), &app_name) {
        Ok(conn) => {
            let _ = APP_DB.set(Mutex::new(conn));
            let _ = APP_DB_PATH.set(db_path.clone());
            info!(
                "event=app_init module=ffi status=ok db_path={}",
                db_path.display()
            );
            AppInitResponse {
                ok: true,
                db_path: Some(db_path.display().to_string()),
                message: "Storage ready.".to_string(),
            }
        }
        Err(err) => {
            error!("event=app_init module=ffi status=error error={err}");
            AppInitResponse {
                ok: false,
                db_path: None,
                message: format!("init_app failed: {err}"),
            }
        }
    }
}

/// Creates one note.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created note on success.
#[flutter_rust_bridge::frb(sync)]
pub fn create_note(title: String, content: String) -> NoteResponse {
    match with_service(|service| service.create_note(title, content)) {
        Ok(note) => NoteResponse::success("Note created.", note),
        Err(err) => NoteResponse::failure(format!("create_note failed: {err}")),
    }
}

/// Lists all notes, newest-modified first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_notes() -> NotesListResponse {
    match with_service(|service| service.list_notes()) {
        Ok(notes) => {
            let items = notes.into_iter().map(NoteItem::from).collect::<Vec<_>>();
            let message = format!("{} note(s).", items.len());
            NotesListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => NotesListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("list_notes failed: {err}"),
        },
    }
}

/// Gets one note by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed ids arrive as failure envelopes.
#[flutter_rust_bridge::frb(sync)]
pub fn get_note(id: String) -> NoteResponse {
    let note_id = match parse_note_id(&id) {
        Ok(note_id) => note_id,
        Err(message) => return NoteResponse::failure(message),
    };
    match with_service(|service| service.get_note(note_id)) {
        Ok(note) => NoteResponse::success("Note found.", note),
        Err(err) => NoteResponse::failure(format!("get_note failed: {err}")),
    }
}

/// Updates title and content of one note.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed ids arrive as failure envelopes.
/// - Returns the updated note on success.
#[flutter_rust_bridge::frb(sync)]
pub fn update_note(id: String, title: String, content: String) -> NoteResponse {
    let note_id = match parse_note_id(&id) {
        Ok(note_id) => note_id,
        Err(message) => return NoteResponse::failure(message),
    };
    match with_service(|service| service.update_note(note_id, title, content)) {
        Ok(note) => NoteResponse::success("Note updated.", note),
        Err(err) => NoteResponse::failure(format!("update_note failed: {err}")),
    }
}

/// Deletes one note by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed ids arrive as failure envelopes.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_note(id: String) -> ActionResponse {
    let note_id = match parse_note_id(&id) {
        Ok(note_id) => note_id,
        Err(message) => {
            return ActionResponse {
                ok: false,
                message,
            }
        }
    };
    match with_service(|service| service.delete_note(note_id)) {
        Ok(()) => ActionResponse {
            ok: true,
            message: "Note deleted.".to_string(),
        },
        Err(err) => ActionResponse {
            ok: false,
            message: format!("delete_note failed: {err}"),
        },
    }
}

fn active_resolver() -> Box<dyn DataDirResolver> {
    if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Box::new(FixedDataDir(PathBuf::from(trimmed)));
        }
    }
    Box::new(PlatformDataDir)
}

fn parse_note_id(id: &str) -> Result<noteapp_core::NoteId, String> {
    Uuid::parse_str(id.trim()).map_err(|_| format!("invalid note id: `{id}`"))
}

fn with_service<T>(
    f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> Result<T, NoteServiceError>,
) -> Result<T, String> {
    let mutex = APP_DB
        .get()
        .ok_or_else(|| "storage not initialized; call init_app first".to_string())?;
    let guard: MutexGuard<'_, Connection> = match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let repo = SqliteNoteRepository::try_new(&guard)
        .map_err(|err| format!("repository init failed: {err}"))?;
    let service = NoteService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, create_note, delete_note, get_note, init_app, init_logging, list_notes,
        ping, update_note, DATA_DIR_ENV,
    };
    use std::sync::OnceLock;

    static TEST_STORE: OnceLock<tempfile::TempDir> = OnceLock::new();

    // The process-wide connection is initialized once; every DB-backed test
    // funnels through this helper.
    fn ensure_app_ready() {
        let dir = TEST_STORE.get_or_init(|| {
            let dir = tempfile::tempdir().expect("create temp store");
            std::env::set_var(DATA_DIR_ENV, dir.path());
            dir
        });
        std::env::set_var(DATA_DIR_ENV, dir.path());
        let response = init_app("NoteAppTest".to_string());
        assert!(response.ok, "{}", response.message);
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/noteapp-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_app_is_idempotent() {
        ensure_app_ready();
        let again = init_app("NoteAppTest".to_string());
        assert!(again.ok);
        assert!(again.db_path.is_some());
    }

    #[test]
    fn create_get_update_delete_roundtrip() {
        ensure_app_ready();

        let created = create_note("Groceries".to_string(), "Milk, eggs".to_string());
        assert!(created.ok, "{}", created.message);
        let note = created.note.expect("created note payload");
        assert_eq!(note.created_at, note.updated_at);

        let fetched = get_note(note.id.clone());
        assert!(fetched.ok, "{}", fetched.message);
        assert_eq!(fetched.note, Some(note.clone()));

        let updated = update_note(note.id.clone(), "Groceries".to_string(), "Milk".to_string());
        assert!(updated.ok, "{}", updated.message);
        let updated_note = updated.note.expect("updated note payload");
        assert_eq!(updated_note.content, "Milk");
        assert_eq!(updated_note.created_at, note.created_at);
        assert!(updated_note.updated_at >= note.updated_at);

        let deleted = delete_note(note.id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        let gone = get_note(note.id);
        assert!(!gone.ok);
        assert!(gone.message.contains("not found"));
    }

    #[test]
    fn list_includes_created_note() {
        ensure_app_ready();
        let created = create_note("listed".to_string(), String::new());
        assert!(created.ok, "{}", created.message);
        let id = created.note.expect("note payload").id;

        let listed = list_notes();
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.iter().any(|item| item.id == id));
    }

    #[test]
    fn malformed_ids_return_failure_envelopes() {
        ensure_app_ready();
        assert!(!get_note("not-a-uuid".to_string()).ok);
        assert!(!update_note("not-a-uuid".to_string(), "t".into(), "c".into()).ok);
        assert!(!delete_note("not-a-uuid".to_string()).ok);
    }

    #[test]
    fn missing_id_returns_not_found_message() {
        ensure_app_ready();
        let response = get_note("8d8bb53c-40a2-4b7e-90e4-4c0e42a218f0".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("not found"));
    }
}
