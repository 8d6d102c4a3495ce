//! Upload validation in front of the file repository.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;
use uuid::Uuid;

use docstat_core::{
    normalize_content_hash, sanitize_filename, validate_text_upload, Error, FileRecord,
    FileRepository, Result, UploadOutcome,
};

/// Content store: validated, deduplicated text file storage.
#[derive(Clone)]
pub struct ContentStore {
    repository: Arc<dyn FileRepository>,
    max_upload_bytes: usize,
}

impl ContentStore {
    pub fn new(repository: Arc<dyn FileRepository>, max_upload_bytes: usize) -> Self {
        Self {
            repository,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validate and store an uploaded file.
    ///
    /// `content_type` is the media type the client claimed for the part.
    pub async fn upload(
        &self,
        filename: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<UploadOutcome> {
        let start = Instant::now();
        let name = sanitize_filename(filename);
        validate_text_upload(&name, content_type, data, self.max_upload_bytes)?;

        let outcome = self.repository.store(&name, data).await?;

        info!(
            subsystem = "api",
            component = "content_store",
            op = "upload",
            file_id = %outcome.id,
            file_name = %name,
            size_bytes = data.len(),
            existed = outcome.existed,
            duration_ms = start.elapsed().as_millis() as u64,
            "File upload handled"
        );
        Ok(outcome)
    }

    pub async fn get(&self, id: Uuid) -> Result<FileRecord> {
        self.repository.get_by_id(id).await
    }

    /// Look up by digest. Upper-case hex is accepted.
    pub async fn get_by_hash(&self, hash: &str) -> Result<FileRecord> {
        let hash = normalize_content_hash(hash)
            .ok_or_else(|| Error::InvalidInput(format!("Invalid content hash: {}", hash)))?;
        self.repository.get_by_hash(&hash).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repository.delete(id).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.repository.count().await
    }
}
