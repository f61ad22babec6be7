use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode or decode document: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value storage for JSON documents.
pub trait BlobStore {
    /// `Ok(None)` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store, mostly for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn read_only() -> Self {
        Self {
            blobs: RefCell::default(),
            fail_writes: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable(format!("{key} is read-only")));
        }
        self.insert(key, value);
        Ok(())
    }
}

impl<S: BlobStore + ?Sized> BlobStore for std::rc::Rc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.read("k").unwrap().is_none());
        store.write("k", "{}").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_read_only_store_rejects_writes() {
        let store = MemoryStore::read_only();
        assert!(matches!(
            store.write("k", "{}"),
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.get("k").is_none());
    }
}
