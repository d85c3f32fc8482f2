use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::viewer::{InstanceRecord, ViewerSettings, ViewerSource};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SelectRequest {
    /// Absolute `http(s)` URL, absolute path, or the name of a managed PDF.
    #[schema(example = "syllabus.pdf")]
    pub file: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SelectResponse {
    /// URL the viewer should load.
    #[schema(example = "/api/v1/assets/serve?file=syllabus.pdf")]
    pub url: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Name the PDF was stored under; may carry a `_N` suffix.
    #[schema(example = "report_1.pdf")]
    pub filename: String,
}

/// What the student view needs to render one instance.
#[derive(Serialize, utoipa::ToSchema)]
pub struct InstanceView {
    #[schema(example = "block-v1:course+type@pdf+block@a1b2")]
    pub id: String,
    pub settings: ViewerSettings,
    pub local_file: Option<String>,
    pub external_url: Option<String>,
    /// Resolved document URL; null until something is selected.
    pub url: Option<String>,
    pub configured: bool,
}

impl InstanceView {
    pub fn new(id: String, record: InstanceRecord, source: &ViewerSource) -> Self {
        Self {
            id,
            local_file: record.selection.local_file().map(str::to_string),
            external_url: record.selection.external_url().map(str::to_string),
            url: source.url().map(str::to_string),
            configured: record.selection.is_configured(),
            settings: record.settings,
        }
    }
}

/// Instance ids come from the host platform; accept its usual alphabet only.
pub fn validate_instance_id(id: &str) -> Result<(), AppError> {
    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '@' | '+' | '-'));
    if id.is_empty() || id.len() > 128 || !valid_chars {
        return Err(AppError::Validation("Invalid instance id".into()));
    }
    Ok(())
}
