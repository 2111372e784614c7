//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for notes.
//! - Isolate SQL statement details from service orchestration.
//!
//! # Invariants
//! - Each repository operation wraps exactly one SQL statement.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod note_repo;
