//! File-analysis service.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use docstat_analysis::{AnalysisPipeline, HttpContentSource, HttpWordCloudRenderer};
use docstat_api::{
    analysis_router, shutdown_signal, telemetry, AnalysisServiceConfig, AnalysisState,
};
use docstat_db::{Database, PoolConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let _log_guard = telemetry::init_tracing(
        "docstat_analysis=debug,docstat_api=debug,docstat_db=debug,tower_http=debug",
        "docstat-analysis.log",
    );

    let config = AnalysisServiceConfig::from_env();

    let pool_config = PoolConfig::default().max_connections(config.db_max_connections);
    let db = Database::connect(&config.database_url, &pool_config).await?;
    db.migrate().await?;
    info!(subsystem = "db", "Migrations applied");

    let content = HttpContentSource::new(config.content.clone())?;
    info!(storage_url = %content.base_url(), "Content store client ready");

    let mut pipeline = AnalysisPipeline::new(Arc::new(db.analyses.clone()), Arc::new(content));
    if config.word_cloud.enabled {
        let renderer = HttpWordCloudRenderer::from_config(&config.word_cloud)?;
        info!(renderer_url = %renderer.api_url(), "Word cloud rendering enabled");
        pipeline = pipeline
            .with_renderer(Arc::new(renderer))
            .with_options(config.word_cloud.options());
    } else {
        info!("Word cloud rendering disabled");
    }

    let app = analysis_router(AnalysisState { pipeline });

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Starting analysis service on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
