//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every method issues exactly one parameterized SQL statement.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List order is `updated_at DESC, rowid DESC` (newest-modified first,
//!   insertion order breaking same-second ties).

use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Operation-level repository error.
///
/// `NotFound` is recoverable and signals "no such id"; the other variants
/// surface storage failures at the caller's discretion.
#[derive(Debug)]
pub enum RepoError {
    /// No row matches the requested id.
    NotFound(NoteId),
    /// Underlying store failure, tagged with the failing operation.
    Persistence {
        op: &'static str,
        source: rusqlite::Error,
    },
    /// Persisted state violates a model invariant.
    InvalidData(String),
    /// The connection is missing the required table.
    MissingTable(&'static str),
    /// The connection is missing a required column.
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    fn persistence(op: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Persistence { op, source }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Persistence { op, source } => write!(f, "{op} failed: {source}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    /// Inserts one fully-populated note row.
    fn insert_note(&self, note: &Note) -> RepoResult<()>;
    /// Lists all notes, newest-modified first.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Rewrites title, content and `updated_at` for one note.
    fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
        updated_at: i64,
    ) -> RepoResult<()>;
    /// Removes one note row.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository borrowing one ready connection.
#[derive(Debug)]
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository after verifying the connection carries the
    /// expected `notes` layout.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO notes (id, title, content, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.content.as_str(),
                    note.created_at,
                    note.updated_at,
                ],
            )
            .map_err(RepoError::persistence("note_insert"))?;
        Ok(())
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{NOTE_SELECT_SQL} ORDER BY updated_at DESC, rowid DESC;"
            ))
            .map_err(RepoError::persistence("note_list"))?;

        let mut rows = stmt
            .query([])
            .map_err(RepoError::persistence("note_list"))?;
        let mut notes = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(RepoError::persistence("note_list"))?
        {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))
            .map_err(RepoError::persistence("note_get"))?;

        let mut rows = stmt
            .query([id.to_string()])
            .map_err(RepoError::persistence("note_get"))?;
        if let Some(row) = rows.next().map_err(RepoError::persistence("note_get"))? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
        updated_at: i64,
    ) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes
                 SET title = ?1, content = ?2, updated_at = ?3
                 WHERE id = ?4;",
                params![title, content, updated_at, id.to_string()],
            )
            .map_err(RepoError::persistence("note_update"))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])
            .map_err(RepoError::persistence("note_delete"))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row
        .get("id")
        .map_err(RepoError::persistence("note_row_read"))?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id"))
    })?;

    let title: String = row
        .get("title")
        .map_err(RepoError::persistence("note_row_read"))?;
    // Legacy rows may carry NULL content; the model treats that as empty.
    let content: Option<String> = row
        .get("content")
        .map_err(RepoError::persistence("note_row_read"))?;
    let created_at: i64 = row
        .get("created_at")
        .map_err(RepoError::persistence("note_row_read"))?;
    let updated_at: i64 = row
        .get("updated_at")
        .map_err(RepoError::persistence("note_row_read"))?;

    if created_at > updated_at {
        return Err(RepoError::InvalidData(format!(
            "created_at {created_at} is later than updated_at {updated_at} for note {id}"
        )));
    }

    Ok(Note {
        id,
        title,
        content: content.unwrap_or_default(),
        created_at,
        updated_at,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingTable("notes"));
    }

    for column in ["id", "title", "content", "created_at", "updated_at"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &'static str) -> RepoResult<bool> {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )
        .map_err(RepoError::persistence("schema_check"))?;
    Ok(exists == 1)
}

fn table_has_column(
    conn: &Connection,
    table: &'static str,
    column: &'static str,
) -> RepoResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .map_err(RepoError::persistence("schema_check"))?;
    let mut rows = stmt
        .query([])
        .map_err(RepoError::persistence("schema_check"))?;
    while let Some(row) = rows
        .next()
        .map_err(RepoError::persistence("schema_check"))?
    {
        let current: String = row
            .get(1)
            .map_err(RepoError::persistence("schema_check"))?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
