//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `noteapp_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use noteapp_core::{database_path, DataDirResolver, PlatformDataDir};

fn main() {
    println!("noteapp_core ping={}", noteapp_core::ping());
    println!("noteapp_core version={}", noteapp_core::core_version());

    match PlatformDataDir.resolve("NoteApp") {
        Ok(dir) => println!("data_dir={}", dir.display()),
        Err(err) => println!("data_dir_error={err}"),
    }
    match database_path(&PlatformDataDir, "NoteApp") {
        Ok(path) => println!("db_path={}", path.display()),
        Err(err) => println!("db_path_error={err}"),
    }
}
