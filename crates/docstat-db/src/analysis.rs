//! Analysis result repository backed by PostgreSQL.
//!
//! `analysis_results.file_id` is the primary key. Inserts use
//! `ON CONFLICT (file_id) DO NOTHING` so the first successful write wins and
//! every later writer gets the stored row back unchanged.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use docstat_core::{AnalysisRecord, AnalysisRepository, CacheLookup, Error, Result};

/// PostgreSQL analysis repository.
#[derive(Clone)]
pub struct PgAnalysisRepository {
    pool: PgPool,
}

impl PgAnalysisRepository {
    /// Create a new analysis repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, file_id: Uuid) -> Result<Option<AnalysisRecord>> {
        let record = sqlx::query_as::<_, AnalysisRecord>(
            r#"SELECT file_id, paragraphs_count, words_count, symbols_count, word_cloud_url
               FROM analysis_results WHERE file_id = $1"#,
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}

#[async_trait]
impl AnalysisRepository for PgAnalysisRepository {
    async fn lookup(&self, file_id: Uuid) -> Result<CacheLookup> {
        Ok(self.fetch(file_id).await?.into())
    }

    async fn insert_once(&self, record: AnalysisRecord) -> Result<AnalysisRecord> {
        let inserted = sqlx::query_as::<_, AnalysisRecord>(
            r#"INSERT INTO analysis_results
               (file_id, paragraphs_count, words_count, symbols_count, word_cloud_url)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (file_id) DO NOTHING
               RETURNING file_id, paragraphs_count, words_count, symbols_count, word_cloud_url"#,
        )
        .bind(record.file_id)
        .bind(record.paragraphs_count)
        .bind(record.words_count)
        .bind(record.symbols_count)
        .bind(&record.word_cloud_url)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(stored) = inserted {
            info!(
                subsystem = "db",
                component = "analysis",
                op = "insert",
                file_id = %stored.file_id,
                "Stored analysis result"
            );
            return Ok(stored);
        }

        debug!(
            subsystem = "db",
            component = "analysis",
            op = "insert",
            file_id = %record.file_id,
            "Analysis already stored by a concurrent request"
        );
        self.fetch(record.file_id).await?.ok_or_else(|| {
            Error::Internal(format!(
                "Analysis for file {} conflicted but could not be read back",
                record.file_id
            ))
        })
    }

    async fn exists(&self, file_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM analysis_results WHERE file_id = $1)",
        )
        .bind(file_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn delete(&self, file_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM analysis_results WHERE file_id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::AnalysisNotFound(file_id));
        }
        Ok(())
    }
}
