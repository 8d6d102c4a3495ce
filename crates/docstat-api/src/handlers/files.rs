//! File-storage HTTP handlers.
//!
//! - `POST   /api/files/upload`      multipart, field `file`
//! - `GET    /api/files/:id`         raw text
//! - `GET    /api/files/hash/:hash`  raw text by SHA-256 digest
//! - `DELETE /api/files/:id`

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use docstat_core::{defaults, FileRecord, UploadOutcome};

use super::parse_id;
use crate::error::ErrorBody;
use crate::{ApiError, StorageState};

/// Multipart upload form.
#[allow(dead_code)]
#[derive(utoipa::ToSchema)]
pub struct UploadForm {
    /// Plain text file (UTF-8).
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

fn text_response(record: FileRecord) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        record.content,
    )
}

/// Upload a text file.
///
/// Identical content is stored once; re-uploads return the existing id with
/// `existed: true`.
#[utoipa::path(post, path = "/api/files/upload", tag = "Files",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored or already present", body = UploadOutcome),
        (status = 400, description = "Empty, binary or non-text upload", body = ErrorBody)
    ))]
pub async fn upload_file(
    State(state): State<StorageState>,
    mut multipart: Multipart,
) -> Result<Json<UploadOutcome>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?
    {
        if field.name() != Some(defaults::UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {}", e)))?;

        let outcome = state
            .store
            .upload(file_name.as_deref(), content_type.as_deref(), &data)
            .await?;
        return Ok(Json(outcome));
    }

    Err(ApiError::BadRequest(format!(
        "No file uploaded. Use field name '{}'.",
        defaults::UPLOAD_FIELD
    )))
}

/// Download a file's text by id.
#[utoipa::path(get, path = "/api/files/{id}", tag = "Files",
    params(("id" = uuid::Uuid, Path, description = "File id")),
    responses(
        (status = 200, description = "File content", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No such file", body = ErrorBody)
    ))]
pub async fn get_file(
    State(state): State<StorageState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let record = state.store.get(id).await?;
    Ok(text_response(record))
}

/// Download a file's text by SHA-256 digest.
#[utoipa::path(get, path = "/api/files/hash/{hash}", tag = "Files",
    params(("hash" = String, Path, description = "Hex SHA-256 of the content")),
    responses(
        (status = 200, description = "File content", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed digest", body = ErrorBody),
        (status = 404, description = "No file with this digest", body = ErrorBody)
    ))]
pub async fn get_file_by_hash(
    State(state): State<StorageState>,
    Path(hash): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.store.get_by_hash(&hash).await?;
    Ok(text_response(record))
}

/// Delete a file. Its analysis, if any, is kept.
#[utoipa::path(delete, path = "/api/files/{id}", tag = "Files",
    params(("id" = uuid::Uuid, Path, description = "File id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such file", body = ErrorBody)
    ))]
pub async fn delete_file(
    State(state): State<StorageState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
