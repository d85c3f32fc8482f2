use std::path::PathBuf;

use serde::Deserialize;

/// Which asset backend to construct at startup.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Filesystem,
    Memory,
    Object,
}

/// App-level storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageAppConfig {
    /// Backend used for PDF assets. Default: "filesystem".
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// Root directory for the filesystem backend. Default: "./data".
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
    /// Namespace (directory or key prefix) holding every managed PDF. Default: "pdf".
    #[serde(default = "default_storage_namespace")]
    pub namespace: String,
    /// Upload ceiling in bytes. Default: 10 MiB.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// S3-compatible settings, only read when `backend = "object"`.
    #[serde(default)]
    pub object: ObjectStorageConfig,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data")
}
fn default_storage_namespace() -> String {
    "pdf".into()
}
fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            root: default_storage_root(),
            namespace: default_storage_namespace(),
            max_upload_bytes: default_max_upload_bytes(),
            object: ObjectStorageConfig::default(),
        }
    }
}

/// S3-compatible bucket settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ObjectStorageConfig {
    /// Bucket name. Default: "pdfview".
    #[serde(default = "default_object_bucket")]
    pub bucket: String,
    /// Region name. Default: "us-east-1".
    #[serde(default = "default_object_region")]
    pub region: String,
    /// Custom endpoint (MinIO, Garage, ...). Uses AWS when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Use path-style bucket addressing. Default: true.
    #[serde(default = "default_object_path_style")]
    pub path_style: bool,
}

fn default_object_bucket() -> String {
    "pdfview".into()
}
fn default_object_region() -> String {
    "us-east-1".into()
}
fn default_object_path_style() -> bool {
    true
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_object_bucket(),
            region: default_object_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: default_object_path_style(),
        }
    }
}
