use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::debug;

use super::error::StorageError;
use super::record::{AssetRecord, has_pdf_extension, validate_entry_name};
use super::traits::AssetStore;
use crate::config::ObjectStorageConfig;

/// S3-compatible asset store. Assets are keyed `{namespace}/{name}`.
pub struct ObjectAssetStore {
    namespace: String,
    bucket: Box<Bucket>,
}

impl ObjectAssetStore {
    pub fn new(config: &ObjectStorageConfig, namespace: &str) -> Result<Self, StorageError> {
        validate_entry_name(namespace)?;

        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Backend(format!("invalid region: {e}")))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials).map_err(backend)?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            namespace: namespace.to_string(),
            bucket,
        })
    }

    fn key(&self, name: &str) -> Result<String, StorageError> {
        validate_entry_name(name)?;
        Ok(format!("{}/{}", self.namespace, name))
    }
}

/// Visible PDF directly under `prefix`, or `None` for anything else.
fn listed_name<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    let name = key.strip_prefix(prefix)?;
    let visible = !name.is_empty() && !name.starts_with('.') && !name.contains('/');
    (visible && has_pdf_extension(name)).then_some(name)
}

fn backend(err: S3Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn is_not_found(err: &S3Error) -> bool {
    matches!(err, S3Error::HttpFailWithBody(404, _))
}

fn check_status(status: u16, name: &str) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(name.to_string())),
        other => Err(StorageError::Backend(format!("unexpected status {other}"))),
    }
}

#[async_trait]
impl AssetStore for ObjectAssetStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn try_list(&self) -> Result<Vec<AssetRecord>, StorageError> {
        let prefix = format!("{}/", self.namespace);
        let pages = self
            .bucket
            .list(prefix.clone(), Some("/".to_string()))
            .await
            .map_err(backend)?;

        Ok(pages
            .into_iter()
            .flat_map(|page| page.contents)
            .filter_map(|object| {
                listed_name(&prefix, &object.key)
                    .map(|name| AssetRecord::new(&self.namespace, name, object.size))
            })
            .collect())
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let key = self.key(name)?;
        match self.bucket.head_object(&key).await {
            Ok((_, status)) if status == 404 => Ok(false),
            Ok((_, status)) => check_status(status, name).map(|_| true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(backend(e)),
        }
    }

    async fn save(&self, name: &str, data: &[u8]) -> Result<AssetRecord, StorageError> {
        let key = self.key(name)?;
        let response = self.bucket.put_object(&key, data).await.map_err(backend)?;
        check_status(response.status_code(), name)?;

        debug!(key, size = data.len(), "Asset uploaded");
        Ok(AssetRecord::new(&self.namespace, name, data.len() as u64))
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let key = self.key(name)?;
        match self.bucket.get_object(&key).await {
            Ok(response) => {
                check_status(response.status_code(), name)?;
                Ok(response.bytes().to_vec())
            }
            Err(e) if is_not_found(&e) => Err(StorageError::NotFound(name.to_string())),
            Err(e) => Err(backend(e)),
        }
    }

    async fn size(&self, name: &str) -> Result<u64, StorageError> {
        let key = self.key(name)?;
        match self.bucket.head_object(&key).await {
            Ok((head, status)) => {
                check_status(status, name)?;
                let length = head.content_length.unwrap_or_default();
                Ok(u64::try_from(length).unwrap_or_default())
            }
            Err(e) if is_not_found(&e) => Err(StorageError::NotFound(name.to_string())),
            Err(e) => Err(backend(e)),
        }
    }
}
