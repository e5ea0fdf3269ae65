//! In-memory storage implementation.

use super::{BoxFuture, RegionConfig, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    configs: RwLock<HashMap<String, RegionConfig>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, config: &RegionConfig) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let config = config.clone();
        Box::pin(async move {
            let mut configs = self
                .configs
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            configs.insert(id, config);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<RegionConfig>> {
        let id = id.to_string();
        Box::pin(async move {
            let configs = self
                .configs
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            configs.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut configs = self
                .configs
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            configs.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let configs = self
                .configs
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(configs.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let configs = self
                .configs
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(configs.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let mut config = RegionConfig::default();
        config.order.push("x".into());

        block_on(storage.save("test", &config)).unwrap();
        let loaded = block_on(storage.load("test")).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        let config = RegionConfig::default();

        assert!(!block_on(storage.exists("test")).unwrap());
        block_on(storage.save("test", &config)).unwrap();
        assert!(block_on(storage.exists("test")).unwrap());
        block_on(storage.delete("test")).unwrap();
        assert!(!block_on(storage.exists("test")).unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let config = RegionConfig::default();

        block_on(storage.save("doc1", &config)).unwrap();
        block_on(storage.save("doc2", &config)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1".to_string()));
        assert!(list.contains(&"doc2".to_string()));
    }
}
