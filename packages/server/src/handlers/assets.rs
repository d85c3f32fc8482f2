use axum::Json;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::asset::{AssetListResponse, ServeQuery};
use crate::state::AppState;
use crate::utils::filename::content_disposition_value;
use crate::viewer::ServedAsset;

#[utoipa::path(
    get,
    path = "/",
    tag = "Assets",
    operation_id = "listAssets",
    summary = "List managed PDFs",
    description = "Returns every PDF in the managed namespace, sorted by name. \
        Never fails: an unreadable store yields an empty list.",
    responses(
        (status = 200, description = "Asset list", body = AssetListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_assets(State(state): State<AppState>) -> Json<AssetListResponse> {
    Json(state.controller.list().await.into())
}

#[utoipa::path(
    get,
    path = "/serve",
    tag = "Assets",
    operation_id = "serveAsset",
    summary = "Serve a managed PDF inline",
    description = "Streams the named PDF for in-browser display. Directory components in \
        `file` are stripped before lookup. Supports ETag-based caching via If-None-Match.",
    params(ServeQuery),
    responses(
        (status = 200, description = "PDF content", content_type = "application/pdf"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 400, description = "Missing parameter or not a PDF (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "PDF not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn serve_asset(
    State(state): State<AppState>,
    Query(query): Query<ServeQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let asset = state
        .controller
        .serve(query.file.as_deref().unwrap_or_default())
        .await?;

    build_pdf_response(asset, &headers)
}

fn build_pdf_response(asset: ServedAsset, headers: &HeaderMap) -> Result<Response, AppError> {
    let etag_value = format!("\"{}\"", hex::encode(Sha256::digest(&asset.bytes)));
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.content_type)
        .header(header::CONTENT_LENGTH, asset.bytes.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&asset.name),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from(asset.bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}
