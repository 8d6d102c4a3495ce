//! File-storage service.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use docstat_api::{
    shutdown_signal, storage_router, telemetry, ContentStore, StorageServiceConfig, StorageState,
};
use docstat_db::{Database, PoolConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let _log_guard = telemetry::init_tracing(
        "docstat_storage=debug,docstat_api=debug,docstat_db=debug,tower_http=debug",
        "docstat-storage.log",
    );

    let config = StorageServiceConfig::from_env();

    let pool_config = PoolConfig::default().max_connections(config.db_max_connections);
    let db = Database::connect(&config.database_url, &pool_config).await?;
    db.migrate().await?;
    info!(subsystem = "db", "Migrations applied");

    let store = ContentStore::new(Arc::new(db.files.clone()), config.max_upload_bytes);
    let app = storage_router(StorageState { store });

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!(
        max_upload_bytes = config.max_upload_bytes,
        "Starting storage service on {}", addr
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
