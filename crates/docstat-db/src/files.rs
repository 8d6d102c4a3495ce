//! Content-addressed file repository backed by PostgreSQL.
//!
//! Files are deduplicated by SHA-256 of their bytes. The unique index on
//! `files.hash` is the only concurrency control: a new upload inserts with
//! `ON CONFLICT (hash) DO NOTHING`, and a writer that loses the race reads
//! the winning row instead of failing.
//!
//! ## Example
//!
//! ```rust,ignore
//! use docstat_db::PgFileRepository;
//!
//! let repo = PgFileRepository::new(pool);
//! let first = repo.store("essay.txt", b"Hello").await?;
//! let again = repo.store("copy.txt", b"Hello").await?;
//! assert_eq!(first.id, again.id);
//! assert!(again.existed);
//! ```

use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use docstat_core::{
    compute_content_hash, Error, FileRecord, FileRepository, Result, UploadOutcome,
};

/// Attempts made when a conflicting row vanishes between insert and read-back.
const STORE_ATTEMPTS: usize = 3;

/// PostgreSQL file repository.
#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_id_by_hash(&self, hash: &str) -> Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM files WHERE hash = $1")
            .bind(hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    /// Insert a new row unless the hash is taken. Returns the new id on success.
    async fn try_insert(&self, name: &str, hash: &str, content: &[u8]) -> Result<Option<Uuid>> {
        let id = Uuid::now_v7();
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO files (id, name, hash, content, size_bytes)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (hash) DO NOTHING
               RETURNING id"#,
        )
        .bind(id)
        .bind(name)
        .bind(hash)
        .bind(content)
        .bind(content.len() as i64)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inserted)
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn store(&self, name: &str, content: &[u8]) -> Result<UploadOutcome> {
        if content.is_empty() {
            return Err(Error::InvalidInput("Cannot store empty file".to_string()));
        }

        let start = Instant::now();
        let hash = compute_content_hash(content);

        for attempt in 1..=STORE_ATTEMPTS {
            // Reuse existing record (deduplication)
            if let Some(id) = self.find_id_by_hash(&hash).await? {
                debug!(
                    subsystem = "db",
                    component = "files",
                    op = "store",
                    file_id = %id,
                    content_hash = %hash,
                    existed = true,
                    "Content already stored"
                );
                return Ok(UploadOutcome::existing(id));
            }

            match self.try_insert(name, &hash, content).await? {
                Some(id) => {
                    info!(
                        subsystem = "db",
                        component = "files",
                        op = "store",
                        file_id = %id,
                        content_hash = %hash,
                        size_bytes = content.len(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Stored new file"
                    );
                    return Ok(UploadOutcome::created(id));
                }
                None => {
                    // Lost the race on idx_files_hash; the next pass reads the winner.
                    debug!(
                        subsystem = "db",
                        component = "files",
                        op = "store",
                        content_hash = %hash,
                        attempt,
                        "Concurrent insert won on hash"
                    );
                }
            }
        }

        warn!(
            subsystem = "db",
            component = "files",
            op = "store",
            content_hash = %hash,
            "Conflicting file row disappeared before it could be read"
        );
        Err(Error::Internal(format!(
            "Could not store or resolve file with hash {}",
            hash
        )))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            r#"SELECT id, name, hash, content, size_bytes, created_at
               FROM files WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::FileNotFound(id))
    }

    async fn get_by_hash(&self, hash: &str) -> Result<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            r#"SELECT id, name, hash, content, size_bytes, created_at
               FROM files WHERE hash = $1"#,
        )
        .bind(hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("File not found with hash: {}", hash)))
    }

    async fn exists_by_hash(&self, hash: &str) -> Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM files WHERE hash = $1)")
                .bind(hash)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::FileNotFound(id));
        }
        info!(
            subsystem = "db",
            component = "files",
            op = "delete",
            file_id = %id,
            "Deleted file"
        );
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
