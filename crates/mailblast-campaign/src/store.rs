//! File-based snapshot store — one JSON blob file per key.
//! Human-readable, git-friendly; only touched on state changes, never on
//! a timer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::traits::SnapshotStore;

/// File-backed key→blob store rooted at a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> Self {
        std::fs::create_dir_all(dir).ok();
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Default store directory (~/.mailblast/data).
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".mailblast").join("data")
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let file = self.file_for(key);
        if !file.exists() {
            return None;
        }
        match std::fs::read_to_string(&file) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("⚠️ Failed to read {}: {e}", file.display());
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key);
        std::fs::write(&file, value)
            .map_err(|e| MailblastError::Store(format!("Write {}: {e}", file.display())))?;
        tracing::debug!("💾 Saved {} ({} bytes)", file.display(), value.len());
        Ok(())
    }
}

/// In-memory store — volatile, for tests and throwaway runs.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.map.lock().ok()?;
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .map
            .lock()
            .map_err(|e| MailblastError::Store(format!("Lock: {e}")))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join("mailblast-test-filestore");
        let store = FileStore::new(&dir);
        store.set("campaignState", "running").unwrap();
        assert_eq!(store.get("campaignState").as_deref(), Some("running"));
        store.set("campaignState", "paused").unwrap();
        assert_eq!(store.get("campaignState").as_deref(), Some("paused"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = std::env::temp_dir().join("mailblast-test-filestore-missing");
        let store = FileStore::new(&dir);
        assert!(store.get("nope").is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.get("stats").is_none());
        store.set("stats", "{\"totalSent\":1}").unwrap();
        assert_eq!(store.get("stats").as_deref(), Some("{\"totalSent\":1}"));
    }
}
