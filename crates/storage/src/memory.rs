//! In-memory implementation of KeyValueStore

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StorageResult;
use crate::{validate_key, KeyValueStore};

/// Hash map backed storage, useful for tests and throwaway sessions.
///
/// Clones share the same underlying map, so a caller can keep a handle and
/// inspect what an owning component wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_values() {
        let observer = MemoryStore::new();
        let mut writer = observer.clone();

        writer.set("books", "[]").unwrap();

        assert_eq!(observer.get("books").unwrap().as_deref(), Some("[]"));
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("books").unwrap().is_none());
        assert!(store.is_empty());
    }
}
