//! In-process storage backend.
//!
//! Backs tests and short-lived sessions. An optional byte quota reproduces
//! the "quota exceeded" failure browsers raise on oversized writes.

use super::{KeyValueStorage, StorageError, StorageResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once keys plus values exceed
    /// `quota_bytes`.
    pub fn with_quota_bytes(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds `key` directly, bypassing the quota check.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Total bytes of all stored keys and values.
    pub fn used_bytes(&self) -> usize {
        self.items
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self
                .items
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let required = self.used_bytes() - replaced + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::{KeyValueStorage, StorageError};

    #[test]
    fn set_then_get_returns_latest_value() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("todos").unwrap(), None);

        storage.set_item("todos", "[]").unwrap();
        storage.set_item("todos", "[1]").unwrap();
        assert_eq!(storage.get_item("todos").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut storage = MemoryStorage::with_quota_bytes(10);
        storage.set_item("todos", "12345").unwrap();
        // Same size replacement fits because the old value is released.
        storage.set_item("todos", "abcde").unwrap();

        let err = storage.set_item("todos", "abcdef").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 11,
                quota: 10,
                ..
            }
        ));
        assert_eq!(storage.get_item("todos").unwrap().as_deref(), Some("abcde"));
    }
}
