//! Durable string-keyed slots.
//!
//! Each slot holds one string value, read whole and overwritten whole.
//! `FileSlotStore` keeps one file per key and writes through a temp file +
//! rename so a crash never leaves a half-written slot behind.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("slot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode slot value: {0}")]
    Encode(#[from] serde_json::Error),
    /// The slot exists but its bytes are not text.
    #[error("slot {0} does not hold valid UTF-8")]
    Undecodable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait SlotStore: Send {
    /// Current value of `key`, `None` when the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Clear the slot. Clearing an empty slot is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One `<dir>/<key>.json` file per slot.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlotStore for FileSlotStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let bytes = match std::fs::read(self.slot_path(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StorageError::Undecodable(key.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::trace!(slot = key, bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slots, mostly for tests.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut slots) = store.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_slot_missing_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path().join("nested"));
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn file_slot_overwrite_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSlotStore::new(dir.path());
        store.set("favorites", "[1]").unwrap();
        store.set("favorites", "[2]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[2]"));
        assert!(!store.slot_path("favorites").with_extension("json.tmp").exists());

        store.remove("favorites").unwrap();
        store.remove("favorites").unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn file_slot_with_binary_content_is_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path());
        std::fs::write(store.slot_path("favorites"), [0xff, 0xfe, b'[', b']']).unwrap();
        assert!(matches!(
            store.get("favorites"),
            Err(StorageError::Undecodable(key)) if key == "favorites"
        ));
    }
}
