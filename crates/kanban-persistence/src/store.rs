//! Key/value snapshot stores.
//!
//! The board never talks to disk directly. It reads and overwrites whole
//! snapshots through [`SnapshotStore`]. The store is a mirror of in-memory
//! state, not a second writer: there is no partial update and no versioning,
//! so the last `set` wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::atomic::{atomic_write, read_optional};
use crate::error::{PersistenceError, Result};

/// Durable key/value storage for serialized snapshots.
pub trait SnapshotStore {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the stored value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Checks that a key is usable as a file stem.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}

/// File-backed store.
///
/// Each key is one JSON file:
/// ```text
/// base_path/
/// └── store/
///     ├── board.json
///     └── projects.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a new FileStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path of the file backing a key.
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join("store").join(format!("{key}.json")))
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        let value = read_optional(&path)?;
        debug!(key, path = %path.display(), found = value.is_some(), "Read snapshot");
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        atomic_write(&path, value.as_bytes())?;
        debug!(key, path = %path.display(), bytes = value.len(), "Wrote snapshot");
        Ok(())
    }
}

/// In-process store.
///
/// Useful for ephemeral sessions and tests. It counts writes and can be
/// taken offline to simulate an unreachable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with `Unavailable` (or recover).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(
                "memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        self.ensure_online()?;
        let entries = self
            .entries
            .read()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.ensure_online()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("board").is_ok());
        assert!(validate_key("kanban_columns-2").is_ok());
        assert!(matches!(validate_key(""), Err(PersistenceError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../board"),
            Err(PersistenceError::InvalidKey(_))
        ));
        assert!(matches!(
            validate_key("a b"),
            Err(PersistenceError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_store_get_missing() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("board").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("board", "{\"a\":1}").unwrap();

        assert_eq!(store.get("board").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("store").join("board.json").exists());
    }

    #[test]
    fn test_file_store_last_writer_wins() {
        let dir = tempdir().unwrap();
        let first = FileStore::new(dir.path());
        let second = FileStore::new(dir.path());

        first.set("board", "one").unwrap();
        second.set("board", "two").unwrap();

        assert_eq!(first.get("board").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_file_store_rejects_bad_key() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(PersistenceError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_memory_store_roundtrip_and_count() {
        let store = MemoryStore::new();
        assert_eq!(store.get("board").unwrap(), None);

        store.set("board", "v1").unwrap();
        store.set("board", "v2").unwrap();

        assert_eq!(store.get("board").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_memory_store_offline() {
        let store = MemoryStore::new();
        store.set("board", "kept").unwrap();
        store.set_offline(true);

        assert!(matches!(
            store.set("board", "lost"),
            Err(PersistenceError::Unavailable(_))
        ));
        assert!(store.get("board").is_err());
        assert_eq!(store.write_count(), 1);

        store.set_offline(false);
        assert_eq!(store.get("board").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_store_through_reference_and_arc() {
        fn write_via<S: SnapshotStore>(store: S) {
            store.set("k", "v").unwrap();
        }

        let store = Arc::new(MemoryStore::new());
        write_via(&*store);
        write_via(store.clone());
        assert_eq!(store.write_count(), 2);
    }
}
