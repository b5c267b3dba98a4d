//! Local key-value store the client persists UI state through.
//!
//! The store is deliberately opaque: services write serialized strings under
//! composite keys and never assume anything about the backing medium. A
//! JSON-file store backs real runs; the in-memory store backs tests.

use std::collections::HashMap;
use std::path::PathBuf;

use log::warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Composite keys for per-bill and per-party state.
pub mod keys {
    use uuid::Uuid;

    pub fn bill_products(bill_id: &Uuid) -> String {
        format!("Bill_{}_products", bill_id)
    }

    pub fn bill_participation(bill_id: &Uuid) -> String {
        format!("Bill_{}_participation", bill_id)
    }

    pub fn bill_title(bill_id: &Uuid) -> String {
        format!("Bill_{}_title", bill_id)
    }

    pub fn bill_date(bill_id: &Uuid) -> String {
        format!("Bill_{}_date", bill_id)
    }

    pub fn bill_completed(bill_id: &Uuid) -> String {
        format!("Bill_{}_isCompleted", bill_id)
    }

    pub fn party_bills(party_id: &Uuid) -> String {
        format!("Party_{}_bills", party_id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Key-value store persisted as a single JSON object on disk. Every write
/// flushes the whole map; last writer wins, no cross-key transaction.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    // A corrupt store must not take the app down; start over.
                    warn!("store file {} is unreadable ({}), starting empty", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("k", "v").unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn file_store_starts_empty_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn bill_keys_embed_the_bill_id() {
        let id = Uuid::new_v4();
        assert_eq!(keys::bill_products(&id), format!("Bill_{}_products", id));
        assert_eq!(keys::bill_completed(&id), format!("Bill_{}_isCompleted", id));
    }
}
