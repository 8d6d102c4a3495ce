//! # docstat-db
//!
//! PostgreSQL persistence layer for docstat.
//!
//! This crate provides:
//! - Connection pool management
//! - The content-addressed `files` repository (dedup on a unique hash index)
//! - The `analysis_results` cache repository (one row per file id)
//! - In-memory repositories with the same uniqueness rules, for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use docstat_db::{Database, FileRepository, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/docstat", &PoolConfig::default()).await?;
//!     let outcome = db.files.store("hello.txt", b"Hello, world!").await?;
//!     println!("Stored {} (existed: {})", outcome.id, outcome.existed);
//!     Ok(())
//! }
//! ```
pub mod analysis;
pub mod files;
pub mod memory;
pub mod pool;

// Test fixtures for integration tests
pub mod test_fixtures;

// Re-export core types
pub use docstat_core::*;

pub use analysis::PgAnalysisRepository;
pub use files::PgFileRepository;
pub use memory::{InMemoryAnalysisRepository, InMemoryFileRepository};
pub use pool::{connect_pool, PoolConfig};

/// Combined database context with both repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Content-addressed file repository.
    pub files: PgFileRepository,
    /// Analysis result repository.
    pub analyses: PgAnalysisRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            files: PgFileRepository::new(pool.clone()),
            analyses: PgAnalysisRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to `url` and build both repositories on one pool.
    pub async fn connect(url: &str, config: &PoolConfig) -> Result<Self> {
        let pool = connect_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }
}
