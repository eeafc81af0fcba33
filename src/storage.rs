//! Key-value persistence for session, credential and profile blobs.

use std::collections::HashMap;
use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};

/// Flat key-value repository. Values are opaque strings; callers own
/// whatever encoding (JSON, data URLs) they put inside.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Stores each key as one file under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let root = data_dir().ok_or_else(|| eyre!("no platform data directory"))?;
        Self::new(root)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_filename::sanitize(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("unable to read {:?}: {}", path, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            log::warn!("unable to write {:?}: {}", path, err);
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = std::fs::remove_file(self.path_for(key));
    }
}

pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("jarvis-tui"))
}

/// In-memory store, used by tests and as a fallback when the platform
/// has no data directory.
#[derive(Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get("user"), None);

        store.set("user", "tony");
        assert_eq!(store.get("user"), Some("tony".to_string()));

        store.remove("user");
        assert_eq!(store.get("user"), None);
        // Removing an absent key is a no-op.
        store.remove("user");
    }

    #[test]
    fn file_store_round_trip() {
        let root = std::env::temp_dir().join(format!("jarvis-tui-test-{}", uuid::Uuid::new_v4()));
        let mut store = FileStore::new(root.clone()).unwrap();

        store.set("users", r#"{"tony":"m4rk42!x"}"#);
        assert_eq!(store.get("users"), Some(r#"{"tony":"m4rk42!x"}"#.to_string()));

        store.remove("users");
        assert_eq!(store.get("users"), None);

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn file_store_get_survives_unreadable_entry() {
        let root = std::env::temp_dir().join(format!("jarvis-tui-test-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(root.clone()).unwrap();

        // A directory where a value file should be is a read error, not
        // an absent key panic.
        std::fs::create_dir(root.join("users")).unwrap();
        assert_eq!(store.get("users"), None);

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn file_store_sanitizes_keys() {
        let root = std::env::temp_dir().join(format!("jarvis-tui-test-{}", uuid::Uuid::new_v4()));
        let mut store = FileStore::new(root.clone()).unwrap();

        store.set("profile-a/b", "blob");
        assert_eq!(store.get("profile-a/b"), Some("blob".to_string()));

        let _ = std::fs::remove_dir_all(root);
    }
}
