mod error;
mod record;
mod traits;

pub mod filesystem;
pub mod memory;
#[cfg(feature = "object-storage")]
pub mod object;

use std::sync::Arc;

use tracing::info;

pub use error::StorageError;
pub use record::{
    AssetRecord, PDF_CONTENT_TYPE, PDF_EXTENSION, has_pdf_extension, validate_entry_name,
};
pub use traits::AssetStore;

use crate::config::{StorageAppConfig, StorageBackendKind};

/// Construct the asset store selected by configuration.
pub async fn build_store(config: &StorageAppConfig) -> Result<Arc<dyn AssetStore>, StorageError> {
    let store: Arc<dyn AssetStore> = match config.backend {
        StorageBackendKind::Filesystem => Arc::new(
            filesystem::FilesystemAssetStore::new(config.root.clone(), &config.namespace).await?,
        ),
        StorageBackendKind::Memory => Arc::new(memory::MemoryAssetStore::new(&config.namespace)),
        #[cfg(feature = "object-storage")]
        StorageBackendKind::Object => Arc::new(object::ObjectAssetStore::new(
            &config.object,
            &config.namespace,
        )?),
        #[cfg(not(feature = "object-storage"))]
        StorageBackendKind::Object => {
            return Err(StorageError::Backend(
                "object storage support is not compiled in (enable `object-storage`)".into(),
            ));
        }
    };

    info!(backend = ?config.backend, namespace = %config.namespace, "Asset store ready");
    Ok(store)
}
