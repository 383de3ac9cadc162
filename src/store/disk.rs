use crate::core::storage::KeyValueStorage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "local_storage";

/// Storage persisted in a fjall keyspace under the data directory.
pub struct DiskStorage {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStorage {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open storage at {}", path.display()))?;
        let partition =
            keyspace.open_partition(PARTITION_NAME, PartitionCreateOptions::default())?;
        debug!("Opened disk storage at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl KeyValueStorage for DiskStorage {
    async fn get(&self, key: &str) -> Option<String> {
        let res: Result<Option<String>> = (|| {
            if let Some(value) = self.partition.get(key.as_bytes())? {
                debug!("Storage HIT for key: {}", key);
                return Ok(Some(String::from_utf8(value.to_vec())?));
            }
            debug!("Storage MISS for key: {}", key);
            Ok(None)
        })();

        match res {
            Ok(val) => val,
            Err(e) => {
                debug!("DiskStorage get error: {}", e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.partition
            .insert(key.as_bytes(), value.into_bytes())
            .with_context(|| format!("Failed to write key: {key}"))?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Storage SET for key: {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.partition
            .remove(key.as_bytes())
            .with_context(|| format!("Failed to remove key: {key}"))?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Storage REMOVE for key: {}", key);
        Ok(())
    }
}
