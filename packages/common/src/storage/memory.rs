use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::record::{AssetRecord, has_pdf_extension, validate_entry_name};
use super::traits::AssetStore;

/// Process-local asset store. Contents are lost on restart.
pub struct MemoryAssetStore {
    namespace: String,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryAssetStore {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn try_list(&self) -> Result<Vec<AssetRecord>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(name, _)| !name.starts_with('.') && has_pdf_extension(name))
            .map(|(name, data)| AssetRecord::new(&self.namespace, name, data.len() as u64))
            .collect())
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        validate_entry_name(name)?;
        Ok(self.entries.read().await.contains_key(name))
    }

    async fn save(&self, name: &str, data: &[u8]) -> Result<AssetRecord, StorageError> {
        validate_entry_name(name)?;
        self.entries
            .write()
            .await
            .insert(name.to_string(), data.to_vec());
        Ok(AssetRecord::new(&self.namespace, name, data.len() as u64))
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        validate_entry_name(name)?;
        self.entries
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn size(&self, name: &str) -> Result<u64, StorageError> {
        validate_entry_name(name)?;
        self.entries
            .read()
            .await
            .get(name)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }
}
