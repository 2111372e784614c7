//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the application.
//! - Own id and timestamp generation at creation time.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once and never mutated afterwards.
//! - `created_at <= updated_at` always.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for one note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// One user-authored note as persisted in storage.
///
/// Field renames match the JSON contract of the UI host (`createdAt`,
/// `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID, generated at creation and immutable afterwards.
    pub id: NoteId,
    /// Free-text title; no uniqueness constraint.
    pub title: String,
    /// Free-text body; may be empty but never absent.
    pub content: String,
    /// Creation time in Unix seconds. Set once.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Last modification time in Unix seconds. Overwritten on every update.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Note {
    /// Creates a new note with a generated ID and current timestamps.
    ///
    /// # Invariants
    /// - `created_at == updated_at` on the returned record.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = unix_now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Returns the current wall-clock time in Unix seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
