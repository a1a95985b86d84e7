//! In-process key-value store.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{KeyValueStore, RepositoryError};

/// Key-value store held entirely in memory.
///
/// Data is lost when the process exits. Used by tests and when no backend
/// is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, RepositoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), RepositoryError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn insert(&self, key: &str, value: Value) -> Result<bool, RepositoryError> {
        match self.entries.write().await.entry(key.to_owned()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(true)
            }
        }
    }

    async fn remove(&self, key: &str) -> Result<bool, RepositoryError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<(String, Value)>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put("k", json!(1)).await.unwrap();
        store.put("k", json!(2)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!(2)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_only_when_absent() {
        let store = MemoryStore::new();
        assert!(store.insert("k", json!("first")).await.unwrap());
        assert!(!store.insert("k", json!("second")).await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), Some(json!("first")));
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let store = MemoryStore::new();
        store.put("k", json!(true)).await.unwrap();
        assert!(store.remove("k").await.unwrap());
        assert!(!store.remove("k").await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_scan_is_prefix_bounded_and_ordered() {
        let store = MemoryStore::new();
        store.put("products/b", json!(2)).await.unwrap();
        store.put("products/a", json!(1)).await.unwrap();
        store.put("productsx", json!(0)).await.unwrap();
        store.put("users/a", json!(3)).await.unwrap();

        let keys: Vec<_> = store
            .scan("products/")
            .await
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["products/a", "products/b"]);
    }
}
