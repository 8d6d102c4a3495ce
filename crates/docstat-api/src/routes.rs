//! Router assembly for both services.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use docstat_core::defaults;

use crate::handlers::{analysis, files, health};
use crate::openapi::{AnalysisApiDoc, StorageApiDoc};
use crate::request_id::MakeRequestUuidV7;
use crate::{AnalysisState, StorageState};

const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Routes of the file-storage service.
pub fn storage_router(state: StorageState) -> Router {
    let body_limit = state.store.max_upload_bytes() + defaults::MULTIPART_OVERHEAD_BYTES;

    let router = Router::new()
        .route("/health", get(health::storage_health))
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON, StorageApiDoc::openapi()))
        .route("/api/files/upload", post(files::upload_file))
        .route("/api/files/hash/:hash", get(files::get_file_by_hash))
        .route(
            "/api/files/:id",
            get(files::get_file).delete(files::delete_file),
        )
        // Multipart reads are capped by the layer below, not axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit));

    with_request_tracing(router).with_state(state)
}

/// Routes of the file-analysis service.
pub fn analysis_router(state: AnalysisState) -> Router {
    let router = Router::new()
        .route("/health", get(health::analysis_health))
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON, AnalysisApiDoc::openapi()))
        .route(
            "/api/analysis/exists/:fileId",
            get(analysis::analysis_exists),
        )
        .route(
            "/api/analysis/:fileId",
            get(analysis::analyze_file).delete(analysis::delete_analysis),
        );

    with_request_tracing(router).with_state(state)
}

fn with_request_tracing<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http()),
    )
}
