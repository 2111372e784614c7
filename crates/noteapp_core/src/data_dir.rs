//! Platform data-directory resolution.
//!
//! # Responsibility
//! - Resolve the per-OS writable base directory for application data.
//! - Keep the storage layer fully platform-agnostic behind one trait.
//!
//! # Invariants
//! - Resolution never touches the filesystem; directory creation is owned by
//!   the storage initializer.
//! - Returned paths always end with the application name segment.

use crate::db::StorageError;
use directories::BaseDirs;
use std::path::PathBuf;

/// Capability interface supplying the application data directory.
///
/// One production implementation exists per process; tests and hosts that
/// manage their own layout use [`FixedDataDir`].
pub trait DataDirResolver {
    /// Returns the absolute directory where `app_name`'s data lives.
    fn resolve(&self, app_name: &str) -> Result<PathBuf, StorageError>;
}

/// OS-convention resolver.
///
/// Picks roaming AppData on Windows, `~/Library/Application Support` on
/// macOS and XDG data home (`~/.local/share` fallback) on Linux. When the
/// platform reports no data directory the home directory is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformDataDir;

impl DataDirResolver for PlatformDataDir {
    fn resolve(&self, app_name: &str) -> Result<PathBuf, StorageError> {
        let base = BaseDirs::new().ok_or(StorageError::DataDirUnavailable)?;
        let data_dir = base.data_dir();
        let root = if data_dir.as_os_str().is_empty() {
            base.home_dir().to_path_buf()
        } else {
            data_dir.to_path_buf()
        };
        Ok(root.join(app_name))
    }
}

/// Resolver pinned to a caller-provided base directory.
#[derive(Debug, Clone)]
pub struct FixedDataDir(pub PathBuf);

impl DataDirResolver for FixedDataDir {
    fn resolve(&self, app_name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.0.join(app_name))
    }
}

#[cfg(test)]
mod tests {
    use super::{DataDirResolver, FixedDataDir, PlatformDataDir};
    use std::path::PathBuf;

    #[test]
    fn fixed_resolver_appends_app_name() {
        let resolver = FixedDataDir(PathBuf::from("/tmp/base"));
        let resolved = resolver.resolve("NoteApp").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/base/NoteApp"));
    }

    #[test]
    fn platform_resolver_ends_with_app_name() {
        let resolved = PlatformDataDir.resolve("NoteApp").unwrap();
        assert!(resolved.ends_with("NoteApp"));
        assert!(resolved.is_absolute());
    }
}
