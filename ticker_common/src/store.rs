//! Durable key-value store port and its implementations.
//!
//! The watch UI persists two values across restarts: the last settled query
//! and the last non-empty selection. Rather than a process-wide singleton,
//! the store is an explicit port injected into the components that need it,
//! so each is testable against the in-memory stub.
//!
//! `FileStore` keeps the whole map as a single JSON object on disk, rewritten
//! on every mutation. A missing or corrupt file is treated as an empty store;
//! consumers likewise tolerate a corrupt stored value by falling back to
//! "absent".
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::result::Result;

/// Store key holding the last settled query string.
pub const PREV_QUERY_KEY: &str = "prevQuery";
/// Store key holding the last non-empty selection, JSON-serialized.
pub const PREV_SELECTION_KEY: &str = "prevSearchRes";

/// String-to-string key-value store that survives a restart.
pub trait KeyValueStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removes the value stored under `key`, if any.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed store persisting the map as one JSON object.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, loading any previously persisted entries.
    ///
    /// A missing file starts the store empty; a file that fails to parse is
    /// ignored the same way rather than aborting startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries: HashMap<String, String> = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    fn persist(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// In-memory store used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(PREV_QUERY_KEY), None);

        store.set(PREV_QUERY_KEY, "aapl, msft").unwrap();
        assert_eq!(store.get(PREV_QUERY_KEY).as_deref(), Some("aapl, msft"));

        store.remove(PREV_QUERY_KEY).unwrap();
        assert_eq!(store.get(PREV_QUERY_KEY), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let mut store = FileStore::open(&path);
            store.set(PREV_QUERY_KEY, "tsla").unwrap();
            store.set(PREV_SELECTION_KEY, "{}").unwrap();
            store.remove(PREV_SELECTION_KEY).unwrap();
        }

        let store = FileStore::open(&path);
        assert_eq!(store.get(PREV_QUERY_KEY).as_deref(), Some("tsla"));
        assert_eq!(store.get(PREV_SELECTION_KEY), None);
    }

    #[test]
    fn file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json {").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get(PREV_QUERY_KEY), None);

        // The store stays usable and overwrites the corrupt file.
        store.set(PREV_QUERY_KEY, "ko").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(PREV_QUERY_KEY).as_deref(), Some("ko"));
    }

    #[test]
    fn removing_absent_key_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::open(&path);
        store.remove(PREV_QUERY_KEY).unwrap();
        assert!(!path.exists());
    }
}
