//! Note use-case service.
//!
//! # Responsibility
//! - Expose the five note operations: create, list, get, update, delete.
//! - Own id and timestamp generation for write paths.
//!
//! # Invariants
//! - `create_note` yields `created_at == updated_at`.
//! - `update_note` never touches `created_at`.
//! - Every operation is stateless given the repository; no caching, no
//!   cross-operation transactions.

use crate::model::note::{unix_now, Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note and returns the persisted record.
    pub fn create_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let note = Note::new(title, content);
        self.repo.insert_note(&note)?;
        match self.repo.get_note(note.id)? {
            Some(persisted) => Ok(persisted),
            None => Err(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            )),
        }
    }

    /// Lists all notes ordered by last modification, newest first.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list_notes()?)
    }

    /// Gets one note by stable ID.
    pub fn get_note(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::NotFound(id))
    }

    /// Replaces title and content, stamps `updated_at`, and returns the
    /// re-read row.
    pub fn update_note(
        &self,
        id: NoteId,
        title: impl AsRef<str>,
        content: impl AsRef<str>,
    ) -> Result<Note, NoteServiceError> {
        self.repo
            .update_note(id, title.as_ref(), content.as_ref(), unix_now())?;
        match self.repo.get_note(id)? {
            Some(persisted) => Ok(persisted),
            None => Err(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            )),
        }
    }

    /// Deletes one note.
    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        Ok(())
    }
}
