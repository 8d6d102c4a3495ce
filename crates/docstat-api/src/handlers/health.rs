use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::warn;

use crate::{AnalysisState, StorageState};

/// Storage health: reports the stored file count, 503 when storage is unreachable.
pub async fn storage_health(State(state): State<StorageState>) -> impl IntoResponse {
    match state.store.count().await {
        Ok(files) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "docstat-storage",
                "version": env!("CARGO_PKG_VERSION"),
                "files": files,
            })),
        ),
        Err(e) => {
            warn!(subsystem = "api", op = "health", error = %e, "Storage check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "docstat-storage",
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}

pub async fn analysis_health(State(state): State<AnalysisState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "docstat-analysis",
        "version": env!("CARGO_PKG_VERSION"),
        "word_cloud": state.pipeline.renders_word_cloud(),
    }))
}
