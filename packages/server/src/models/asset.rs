use pdfview_common::AssetRecord;
use serde::{Deserialize, Serialize};

/// Response DTO for a single managed PDF.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetResponse {
    /// Stored filename, unique within the namespace.
    #[schema(example = "report_1.pdf")]
    pub name: String,
    /// Size in bytes.
    #[schema(example = 142857)]
    pub size: u64,
}

/// Response DTO for listing managed PDFs.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetListResponse {
    pub assets: Vec<AssetResponse>,
    pub total: u64,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServeQuery {
    /// Requested PDF name. Directory components are ignored.
    #[param(example = "syllabus.pdf")]
    pub file: Option<String>,
}

impl From<AssetRecord> for AssetResponse {
    fn from(record: AssetRecord) -> Self {
        Self {
            name: record.name,
            size: record.size_bytes,
        }
    }
}

impl From<Vec<AssetRecord>> for AssetListResponse {
    fn from(records: Vec<AssetRecord>) -> Self {
        let total = records.len() as u64;
        let assets = records.into_iter().map(AssetResponse::from).collect();
        Self { assets, total }
    }
}
