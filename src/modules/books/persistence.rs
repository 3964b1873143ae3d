//! Persistence adapter: the whole collection as one JSON value under one key.

use std::collections::HashSet;

use novalib_storage::{KeyValueStore, StorageError};

use super::models::BookRecord;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "books";

/// Reads and writes the full book collection through a [`KeyValueStore`].
#[derive(Debug)]
pub struct BookArchive<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> BookArchive<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the stored collection.
    ///
    /// Absent, unreadable, or malformed values all yield an empty collection.
    /// Records repeating an earlier id are dropped.
    pub fn load(&self) -> Vec<BookRecord> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored collection; starting empty");
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "failed to read stored collection; starting empty");
                return Vec::new();
            }
        };

        let records: Vec<BookRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "stored collection is malformed; starting empty");
                return Vec::new();
            }
        };

        let total = records.len();
        let mut seen = HashSet::with_capacity(total);
        let records: Vec<BookRecord> = records
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect();

        if records.len() != total {
            tracing::warn!(
                key = %self.key,
                dropped = total - records.len(),
                "stored collection repeated ids; kept first occurrence"
            );
        }

        tracing::debug!(key = %self.key, count = records.len(), "collection loaded");
        records
    }

    /// Replace the stored value with the full collection.
    pub fn save(&mut self, records: &[BookRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(&self.key, &raw)?;
        tracing::debug!(key = %self.key, count = records.len(), "collection saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::{BookId, BookStatus};
    use novalib_storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn sample() -> Vec<BookRecord> {
        let mut issued = BookRecord::new(BookId::Numeric(2), "1984", "Orwell");
        issued.status = BookStatus::Issued;
        vec![
            issued,
            BookRecord::new(BookId::Numeric(1), "Dune", "Herbert"),
            BookRecord::new(BookId::Text("legacy".into()), "Emma", "Austen"),
        ]
    }

    #[test]
    fn empty_storage_loads_empty() {
        let archive = BookArchive::new(MemoryStore::new());
        assert!(archive.load().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order_and_fields() {
        let mut archive = BookArchive::new(MemoryStore::new());
        let records = sample();

        archive.save(&records).unwrap();
        assert_eq!(archive.load(), records);
    }

    #[test]
    fn file_backend_round_trip() {
        let temp = TempDir::new().unwrap();
        let records = sample();

        BookArchive::new(FileStore::new(temp.path()))
            .save(&records)
            .unwrap();

        let reopened = BookArchive::new(FileStore::new(temp.path()));
        assert_eq!(reopened.load(), records);
    }

    #[test]
    fn save_replaces_previous_value() {
        let store = MemoryStore::new();
        let mut archive = BookArchive::new(store.clone());

        archive.save(&sample()).unwrap();
        archive.save(&[]).unwrap();

        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        assert!(archive.load().is_empty());
    }

    #[test]
    fn malformed_values_fail_closed() {
        let blobs = [
            "not json",
            "{}",
            r#"{"books": []}"#,
            r#"[{"id": 1, "title": "Dune"}]"#,
            r#"[{"id": 1, "title": "Dune", "author": "Herbert", "status": "Lost"}]"#,
            r#"[{"id": true, "title": "Dune", "author": "Herbert", "status": "Available"}]"#,
        ];

        for blob in blobs {
            let mut store = MemoryStore::new();
            store.set(DEFAULT_STORAGE_KEY, blob).unwrap();
            let archive = BookArchive::new(store);
            assert!(archive.load().is_empty(), "blob {blob:?} should load as empty");
        }
    }

    #[test]
    fn non_u64_numeric_ids_load_and_round_trip() {
        let mut store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[
                    {"id": 1, "title": "Keep", "author": "A", "status": "Available"},
                    {"id": -5, "title": "Negative", "author": "B", "status": "Issued"},
                    {"id": 1.5, "title": "Fraction", "author": "C", "status": "Available"}
                ]"#,
            )
            .unwrap();
        let mut archive = BookArchive::new(store);

        let loaded = archive.load();
        let ids: Vec<String> = loaded.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["1", "-5", "1.5"]);

        archive.save(&loaded).unwrap();
        assert_eq!(archive.load(), loaded);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[
                    {"id": 7, "title": "First", "author": "A", "status": "Issued"},
                    {"id": 7, "title": "Second", "author": "B", "status": "Available"},
                    {"id": 8, "title": "Third", "author": "C", "status": "Available"}
                ]"#,
            )
            .unwrap();

        let loaded = BookArchive::new(store).load();
        let titles: Vec<&str> = loaded.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["First", "Third"]);
    }

    #[test]
    fn custom_key_is_used() {
        let store = MemoryStore::new();
        let mut archive = BookArchive::with_key(store.clone(), "shelf");

        archive.save(&sample()).unwrap();

        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
        assert!(store.get("shelf").unwrap().is_some());
        assert_eq!(archive.key(), "shelf");
    }

    #[test]
    fn invalid_key_surfaces_on_save_and_loads_empty() {
        let mut archive = BookArchive::with_key(MemoryStore::new(), "../books");

        assert!(matches!(
            archive.save(&sample()),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(archive.load().is_empty());
    }
}
