pub mod disk;
pub mod memory;
pub mod repository;
pub mod session;

use crate::core::config::{AppConfig, StorageBackend};
use crate::core::storage::KeyValueStorage;
use anyhow::Result;
use disk::DiskStorage;
use memory::MemoryStorage;
use std::sync::Arc;
use tracing::debug;

/// Opens the storage backend selected in `config`.
pub fn open_storage(config: &AppConfig) -> Result<Arc<dyn KeyValueStorage>> {
    match config.storage {
        StorageBackend::Memory => {
            debug!("Using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Disk => {
            let path = config.data_path()?.join("storage");
            Ok(Arc::new(DiskStorage::open(&path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_memory_storage() {
        let config = AppConfig {
            storage: StorageBackend::Memory,
            ..Default::default()
        };
        let storage = open_storage(&config).unwrap();
        assert!(storage.get("budgets").await.is_none());
    }

    #[tokio::test]
    async fn test_open_disk_storage_under_data_path() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            data_path: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let storage = open_storage(&config).unwrap();
        storage.set("budgets", "[]".to_string()).await.unwrap();
        assert!(dir.path().join("storage").exists());
    }
}
