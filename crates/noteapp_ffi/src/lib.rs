//! FFI crate exposing NoteApp core to the UI host.

pub mod api;
