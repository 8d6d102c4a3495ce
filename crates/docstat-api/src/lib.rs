//! # docstat-api
//!
//! HTTP surface of docstat. Two independently deployable services share
//! this crate:
//!
//! - **storage** (`docstat-storage` binary): upload, download and delete
//!   deduplicated text files
//! - **analysis** (`docstat-analysis` binary): cached text statistics and
//!   word clouds for stored files
//!
//! Both expose `/health`, `/api-docs/openapi.json` and Swagger UI at `/docs`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod request_id;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

pub use config::{AnalysisServiceConfig, StorageServiceConfig};
pub use error::ApiError;
pub use routes::{analysis_router, storage_router};
pub use services::ContentStore;
pub use state::{AnalysisState, StorageState};

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
