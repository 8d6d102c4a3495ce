//! File-analysis HTTP handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use docstat_core::AnalysisRecord;

use super::parse_id;
use crate::error::ErrorBody;
use crate::{AnalysisState, ApiError};

/// Analyse a stored file, returning the cached result when one exists.
#[utoipa::path(get, path = "/api/analysis/{fileId}", tag = "Analysis",
    params(("fileId" = uuid::Uuid, Path, description = "Id of a file in the storage service")),
    responses(
        (status = 200, description = "Analysis result", body = AnalysisRecord),
        (status = 400, description = "Analysis failed", body = ErrorBody),
        (status = 500, description = "Unexpected failure", body = ErrorBody)
    ))]
pub async fn analyze_file(
    State(state): State<AnalysisState>,
    Path(file_id): Path<String>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    let file_id = parse_id(&file_id)?;
    let record = state.pipeline.analyze(file_id).await?;
    Ok(Json(record))
}

/// Whether an analysis result is stored for the file.
///
/// Always answers 200; an id that is not a UUID has no stored result.
#[utoipa::path(get, path = "/api/analysis/exists/{fileId}", tag = "Analysis",
    params(("fileId" = uuid::Uuid, Path, description = "File id")),
    responses((status = 200, description = "Cache membership", body = bool)))]
pub async fn analysis_exists(
    State(state): State<AnalysisState>,
    Path(file_id): Path<String>,
) -> Json<bool> {
    match parse_id(&file_id) {
        Ok(file_id) => Json(state.pipeline.exists(file_id).await),
        Err(_) => Json(false),
    }
}

/// Delete a stored analysis result. The file is not touched.
#[utoipa::path(delete, path = "/api/analysis/{fileId}", tag = "Analysis",
    params(("fileId" = uuid::Uuid, Path, description = "File id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No stored analysis", body = ErrorBody)
    ))]
pub async fn delete_analysis(
    State(state): State<AnalysisState>,
    Path(file_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let file_id = parse_id(&file_id)?;
    state.pipeline.delete(file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
