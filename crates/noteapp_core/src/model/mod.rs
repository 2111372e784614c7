//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by repository and host layers.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - `created_at <= updated_at` holds for every record.

pub mod note;
