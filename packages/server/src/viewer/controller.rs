use std::sync::Arc;

use pdfview_common::storage::{AssetRecord, AssetStore, PDF_CONTENT_TYPE, has_pdf_extension};
use tracing::{debug, info};
use url::{Url, form_urlencoded};

use super::error::ViewerError;
use super::selection::{SelectionState, ViewerSource};
use super::settings::SettingsUpdate;
use super::InstanceRecord;
use crate::utils::filename::{sanitize_basename, validate_flat_filename};
use crate::utils::naming::resolve_unique_name;

/// Result of a state-changing action: what to hand back to the caller and
/// the selection the caller should persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<T> {
    pub output: T,
    pub state: SelectionState,
}

/// A PDF ready to be streamed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedAsset {
    /// Sanitized name; the only name that may reach response headers.
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Mediates upload/select/serve against the asset store.
///
/// Operations never persist selection state themselves. They return the
/// next [`SelectionState`], and a failed operation returns no state at all,
/// so the caller's prior state stays untouched.
pub struct SelectionController {
    store: Arc<dyn AssetStore>,
    max_upload_bytes: u64,
    serve_endpoint: String,
}

impl SelectionController {
    /// `serve_endpoint` is the URL (absolute or root-relative) of the serve
    /// route, without query string.
    pub fn new(
        store: Arc<dyn AssetStore>,
        max_upload_bytes: u64,
        serve_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            store,
            max_upload_bytes,
            serve_endpoint: serve_endpoint.into(),
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub async fn list(&self) -> Vec<AssetRecord> {
        self.store.list().await
    }

    /// Name checks that can run before any upload bytes are read.
    pub fn check_upload_name(&self, raw_filename: &str) -> Result<(), ViewerError> {
        let trimmed = raw_filename.trim();
        if trimmed.is_empty() {
            return Err(ViewerError::validation("missing filename"));
        }
        if !has_pdf_extension(trimmed) {
            return Err(ViewerError::validation("bad extension"));
        }
        Ok(())
    }

    /// Store an uploaded PDF under a collision-free name and select it.
    ///
    /// Not idempotent: uploading `report.pdf` twice stores `report.pdf` and
    /// `report_1.pdf`.
    pub async fn upload(
        &self,
        raw_filename: &str,
        data: &[u8],
        declared_length: u64,
    ) -> Result<Transition<String>, ViewerError> {
        self.check_upload_name(raw_filename)?;

        if declared_length > self.max_upload_bytes || data.len() as u64 > self.max_upload_bytes {
            return Err(ViewerError::validation("too large"));
        }

        let filename = validate_flat_filename(sanitize_basename(raw_filename))
            .map_err(|e| ViewerError::validation(e.message()))?;

        let store = self.store.as_ref();
        let name = resolve_unique_name(filename, move |candidate: String| async move {
            store.exists(&candidate).await
        })
        .await?;

        let record = self.store.save(&name, data).await?;
        info!(
            name = %record.name,
            requested = filename,
            size = record.size_bytes,
            "PDF uploaded"
        );

        Ok(Transition {
            state: SelectionState::LocalFile(name.clone()),
            output: name,
        })
    }

    /// Point the instance at an external URL or an existing local asset.
    ///
    /// Returns the viewer URL of the new selection.
    pub async fn select(&self, identifier: &str) -> Result<Transition<String>, ViewerError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ViewerError::validation("missing file parameter"));
        }

        if is_external(identifier) {
            info!(url = identifier, "External PDF selected");
            return Ok(Transition {
                output: identifier.to_string(),
                state: SelectionState::ExternalUrl(identifier.to_string()),
            });
        }

        let name = sanitize_basename(identifier);
        let selectable = has_pdf_extension(name)
            && validate_flat_filename(name).is_ok()
            && self.store.exists(name).await?;
        if !selectable {
            return Err(ViewerError::NotFound(format!("PDF '{name}' not found")));
        }

        info!(name, "Local PDF selected");
        Ok(Transition {
            output: self.serve_url(name),
            state: SelectionState::LocalFile(name.to_string()),
        })
    }

    /// Read a managed PDF for display.
    ///
    /// Directory components are stripped before any lookup, so no request can
    /// address anything outside the namespace.
    pub async fn serve(&self, requested_name: &str) -> Result<ServedAsset, ViewerError> {
        if requested_name.trim().is_empty() {
            return Err(ViewerError::validation("missing file parameter"));
        }

        let name = sanitize_basename(requested_name);
        if !has_pdf_extension(name) {
            return Err(ViewerError::validation("invalid type"));
        }

        let not_found = || ViewerError::NotFound(format!("PDF '{name}' not found"));
        if validate_flat_filename(name).is_err() || !self.store.exists(name).await? {
            return Err(not_found());
        }

        let bytes = self.store.read(name).await?;
        debug!(name, size = bytes.len(), "Serving PDF");

        Ok(ServedAsset {
            name: name.to_string(),
            bytes,
            content_type: PDF_CONTENT_TYPE,
        })
    }

    /// Apply an editor save. All fields are validated before anything changes.
    pub async fn save_settings(
        &self,
        record: &InstanceRecord,
        update: &SettingsUpdate,
    ) -> Result<InstanceRecord, ViewerError> {
        let settings = record.settings.apply(update)?;

        let selection = match update.pdf_url.as_deref().map(str::trim) {
            None => record.selection.clone(),
            Some("") => SelectionState::Unconfigured,
            Some(identifier) => self.select(identifier).await?.state,
        };

        Ok(InstanceRecord {
            settings,
            selection,
        })
    }

    pub fn resolve(&self, state: &SelectionState) -> ViewerSource {
        match state {
            SelectionState::LocalFile(name) => ViewerSource::Served(self.serve_url(name)),
            SelectionState::ExternalUrl(url) => ViewerSource::External(url.clone()),
            SelectionState::Unconfigured => ViewerSource::Unconfigured,
        }
    }

    fn serve_url(&self, name: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
        format!("{}?file={encoded}", self.serve_endpoint)
    }
}

/// Absolute `http(s)` URLs and absolute paths are external sources.
/// Protocol-relative forms (`//host`, `/\host`) are neither.
fn is_external(identifier: &str) -> bool {
    if identifier.starts_with('/') {
        return !identifier.starts_with("//") && !identifier.starts_with("/\\");
    }
    Url::parse(identifier)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
