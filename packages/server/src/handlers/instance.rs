use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::instance::{
    InstanceView, SelectRequest, SelectResponse, UploadResponse, validate_instance_id,
};
use crate::state::AppState;
use crate::viewer::SettingsUpdate;

/// Headroom for multipart framing and the small text fields around the file.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn upload_body_limit(max_upload_bytes: u64) -> DefaultBodyLimit {
    let limit = max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Instances",
    operation_id = "getInstance",
    summary = "Get the student view of an instance",
    description = "Returns display settings, the current selection and the resolved document URL. \
        Instances that were never saved report default settings and `configured = false`.",
    params(("id" = String, Path, description = "Instance ID assigned by the course platform")),
    responses(
        (status = 200, description = "Instance view", body = InstanceView),
        (status = 400, description = "Invalid instance ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InstanceView>, AppError> {
    validate_instance_id(&id)?;

    let record = state.instances.load(&id).await?;
    let source = state.controller.resolve(&record.selection);

    Ok(Json(InstanceView::new(id, record, &source)))
}

#[utoipa::path(
    post,
    path = "/{id}/upload",
    tag = "Instances",
    operation_id = "uploadPdf",
    summary = "Upload a PDF and select it",
    description = "Stores the `pdf_file` multipart field under a collision-free name and makes it \
        the instance's document. An optional `size` field declares the expected length. \
        Uploading an existing name stores a copy with a `_N` suffix.",
    params(("id" = String, Path, description = "Instance ID")),
    request_body(content_type = "multipart/form-data", description = "PDF upload"),
    responses(
        (status = 201, description = "PDF stored and selected", body = UploadResponse),
        (status = 400, description = "Missing filename, bad extension or too large (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    validate_instance_id(&id)?;

    let max_size = state.controller.max_upload_bytes();
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut declared: Option<u64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("pdf_file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                state.controller.check_upload_name(&filename)?;
                if declared.is_some_and(|len| len > max_size) {
                    return Err(AppError::Validation("too large".into()));
                }
                let data = read_bounded(field, max_size).await?;
                upload = Some((filename, data));
            }
            Some("size") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read size: {e}")))?;
                let len = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::Validation("Invalid size".into()))?;
                declared = Some(len);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let (filename, data) = upload.ok_or_else(|| AppError::Validation("missing filename".into()))?;
    let declared = declared.unwrap_or(data.len() as u64);

    let mut record = state.instances.load(&id).await?;
    let transition = state.controller.upload(&filename, &data, declared).await?;

    record.selection = transition.state;
    state.instances.save(&id, &record).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            filename: transition.output,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/{id}/select",
    tag = "Instances",
    operation_id = "selectPdf",
    summary = "Select an external URL or an existing PDF",
    description = "Absolute `http(s)` URLs and absolute paths are accepted without checking them. \
        Anything else must name an existing managed PDF.",
    params(("id" = String, Path, description = "Instance ID")),
    request_body = SelectRequest,
    responses(
        (status = 200, description = "Selection updated", body = SelectResponse),
        (status = 400, description = "Missing file parameter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "PDF not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn select_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SelectRequest>,
) -> Result<Json<SelectResponse>, AppError> {
    validate_instance_id(&id)?;

    let mut record = state.instances.load(&id).await?;
    let transition = state.controller.select(&payload.file).await?;

    record.selection = transition.state;
    state.instances.save(&id, &record).await?;

    Ok(Json(SelectResponse {
        url: transition.output,
    }))
}

#[utoipa::path(
    put,
    path = "/{id}/settings",
    tag = "Instances",
    operation_id = "updateSettings",
    summary = "Save editor settings",
    description = "Partially updates display settings. `pdf_url` changes the selection: \
        absent keeps it, empty clears it, anything else follows the select rules. \
        Nothing is saved unless every field is valid.",
    params(("id" = String, Path, description = "Instance ID")),
    request_body = SettingsUpdate,
    responses(
        (status = 200, description = "Settings saved", body = InstanceView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "PDF not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_settings(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SettingsUpdate>,
) -> Result<Json<InstanceView>, AppError> {
    validate_instance_id(&id)?;

    let record = state.instances.load(&id).await?;
    let record = state.controller.save_settings(&record, &payload).await?;
    state.instances.save(&id, &record).await?;

    info!(instance = %id, configured = record.selection.is_configured(), "Settings saved");

    let source = state.controller.resolve(&record.selection);
    Ok(Json(InstanceView::new(id, record, &source)))
}

/// Buffer a multipart field, giving up as soon as it exceeds `max_size`.
async fn read_bounded(mut field: Field<'_>, max_size: u64) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        if (data.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::Validation("too large".into()));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}

