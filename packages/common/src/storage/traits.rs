use async_trait::async_trait;
use tracing::warn;

use super::error::StorageError;
use super::record::AssetRecord;

/// Flat, namespaced storage for PDF assets.
///
/// Every name passed in must already be a sanitized base filename.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Namespace every entry of this store lives under.
    fn namespace(&self) -> &str;

    /// Enumerate PDF entries, sorted by name.
    ///
    /// Never fails: an enumeration error is logged and reported as an empty
    /// listing so the viewer can still render.
    async fn list(&self) -> Vec<AssetRecord> {
        match self.try_list().await {
            Ok(mut records) => {
                records.sort_by(|a, b| a.name.cmp(&b.name));
                records
            }
            Err(e) => {
                warn!(namespace = self.namespace(), error = %e, "Asset listing failed, reporting empty");
                Vec::new()
            }
        }
    }

    /// Enumerate PDF entries in backend order, surfacing failures.
    async fn try_list(&self) -> Result<Vec<AssetRecord>, StorageError>;

    /// Check whether an entry with exactly this name exists.
    async fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Write `data` under `name`.
    ///
    /// An existing entry with the same name is silently overwritten. Callers
    /// resolve a unique name first.
    async fn save(&self, name: &str, data: &[u8]) -> Result<AssetRecord, StorageError>;

    /// Retrieve all bytes of an entry.
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Get the size of an entry in bytes.
    async fn size(&self, name: &str) -> Result<u64, StorageError>;
}
