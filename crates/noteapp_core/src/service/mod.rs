//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the five note operations.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_service;
