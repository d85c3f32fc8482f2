use serde::Serialize;

use super::error::StorageError;

/// The only document kind managed by this store.
pub const PDF_EXTENSION: &str = "pdf";

/// Content type served for every managed asset.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Metadata describing one stored PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    /// Sanitized base filename, unique within the namespace.
    pub name: String,
    pub size_bytes: u64,
    /// Namespace-relative path, always `{namespace}/{name}`.
    pub path: String,
}

impl AssetRecord {
    pub fn new(namespace: &str, name: &str, size_bytes: u64) -> Self {
        Self {
            name: name.to_string(),
            size_bytes,
            path: format!("{namespace}/{name}"),
        }
    }
}

/// Case-insensitive check for a trailing `.pdf`.
pub fn has_pdf_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}

/// Rejects anything that is not a single flat path segment.
///
/// Backends call this before building a path or key, so a name can never
/// address anything outside the namespace.
pub fn validate_entry_name(name: &str) -> Result<(), StorageError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}
