//! # Filesystem-backed key-value store
//!
//! [`FileStorage`] persists each key as a file under a base directory. It is
//! the native stand-in for the browser's `localStorage`, so a desktop build of
//! the client keeps its session across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>.json
//! ```
//!
//! [`FileStorage::default_location`] uses [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/viiveo/` |
//! | Linux | `~/.local/share/viiveo/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\viiveo\` |

use std::path::PathBuf;

use tracing::warn;

use crate::storage::KeyValueStore;

/// Filesystem-backed key-value store for native builds.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// `<data_dir>/viiveo`, or `./viiveo` when the platform has no data directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("viiveo");
        Self::new(base)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            warn!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.entry_path(key), value) {
            warn!("Failed to write {key}: {e}");
        }
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.entry_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("viiveo_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let storage = FileStorage::new(dir.clone());
        assert!(storage.get("viiveo_user").is_none());

        storage.set("viiveo_user", r#"{"email":"a@b.com"}"#);

        // Re-open from same directory
        let reopened = FileStorage::new(dir.clone());
        assert_eq!(
            reopened.get("viiveo_user").as_deref(),
            Some(r#"{"email":"a@b.com"}"#)
        );

        reopened.remove("viiveo_user");
        assert!(storage.get("viiveo_user").is_none());

        // Removing a missing key is a no-op
        reopened.remove("viiveo_user");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
