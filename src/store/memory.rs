use crate::core::storage::KeyValueStorage;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory storage backed by a HashMap. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Option<String> {
        let storage = self.inner.lock().await;
        let value = storage.get(key).cloned();
        if value.is_some() {
            debug!("Storage HIT for key: {}", key);
        } else {
            debug!("Storage MISS for key: {}", key);
        }
        value
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut storage = self.inner.lock().await;
        debug!("Storage SET for key: {}", key);
        storage.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut storage = self.inner.lock().await;
        storage.remove(key);
        debug!("Storage REMOVE for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_get_set() {
        let storage = MemoryStorage::new();

        // Initially, storage is empty
        assert!(storage.get("budgets").await.is_none());

        storage.set("budgets", "[]".to_string()).await.unwrap();
        assert_eq!(storage.get("budgets").await.as_deref(), Some("[]"));

        // Overwrite
        storage.set("budgets", "[1]".to_string()).await.unwrap();
        assert_eq!(storage.get("budgets").await.as_deref(), Some("[1]"));

        assert!(storage.get("expenses").await.is_none());
    }

    #[tokio::test]
    async fn test_storage_remove() {
        let storage = MemoryStorage::new();

        storage.set("auth-user", "{}".to_string()).await.unwrap();
        storage.remove("auth-user").await.unwrap();
        assert!(storage.get("auth-user").await.is_none());

        // Removing a missing key is fine
        storage.remove("auth-user").await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("categories", "[]".to_string()).await.unwrap();
        assert_eq!(other.get("categories").await.as_deref(), Some("[]"));
    }
}
