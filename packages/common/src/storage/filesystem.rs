use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::StorageError;
use super::record::{AssetRecord, has_pdf_extension, validate_entry_name};
use super::traits::AssetStore;

/// Filesystem-backed asset store.
///
/// Assets live flat in `{root}/{namespace}/{name}`. Writes land in a
/// `.tmp` directory first and are renamed into place.
pub struct FilesystemAssetStore {
    namespace: String,
    dir: PathBuf,
}

impl FilesystemAssetStore {
    /// Create a new filesystem asset store, creating the namespace directory.
    pub async fn new(root: PathBuf, namespace: &str) -> Result<Self, StorageError> {
        validate_entry_name(namespace)?;
        let dir = root.join(namespace);
        fs::create_dir_all(&dir).await?;
        fs::create_dir_all(dir.join(".tmp")).await?;
        Ok(Self {
            namespace: namespace.to_string(),
            dir,
        })
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_entry_name(name)?;
        Ok(self.dir.join(name))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl AssetStore for FilesystemAssetStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn try_list(&self) -> Result<Vec<AssetRecord>, StorageError> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') || !has_pdf_extension(&name) {
                continue;
            }
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            records.push(AssetRecord::new(&self.namespace, &name, meta.len()));
        }

        Ok(records)
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.entry_path(name)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, name: &str, data: &[u8]) -> Result<AssetRecord, StorageError> {
        let path = self.entry_path(name)?;

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(name, size = data.len(), "Asset written");
        Ok(AssetRecord::new(&self.namespace, name, data.len() as u64))
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.entry_path(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, name: &str) -> Result<u64, StorageError> {
        let path = self.entry_path(name)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            Ok(_) => Err(StorageError::NotFound(name.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
