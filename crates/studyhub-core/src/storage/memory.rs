//! In-memory key-value storage with an optional byte quota.

use std::collections::BTreeMap;

use super::PersistentStore;
use crate::error::StorageError;

/// Map-backed [`PersistentStore`].
///
/// With a quota set, a `set` that would push the total stored bytes
/// (keys plus values) past the limit fails with
/// [`StorageError::QuotaExceeded`] and leaves the previous value in place,
/// the same way browser storage behaves when full.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
    writes: BTreeMap<String, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Number of successful writes to `key` so far.
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.get(key).copied().unwrap_or(0)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        *self.writes.entry(key.to_string()).or_default() += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get("goals").unwrap().is_none());
        store.set("goals", "[]").unwrap();
        assert_eq!(store.get("goals").unwrap().as_deref(), Some("[]"));
        store.remove("goals").unwrap();
        assert!(store.get("goals").unwrap().is_none());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut store = MemoryStore::with_quota(16);
        store.set("tasks", "[]").unwrap();
        let err = store.set("tasks", "[\"a long value\"]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_count("tasks"), 1);
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();
        // Replacing the same key only needs room for the new value.
        store.set("k", "987654321").unwrap();
        assert_eq!(store.write_count("k"), 2);
    }
}
