//! Core traits for docstat abstractions.
//!
//! Repositories own the two key spaces (content hash for files, file id for
//! analyses). Collaborators are the remote dependencies of the analysis
//! pipeline; both can be swapped for stubs in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// CONTENT STORE
// =============================================================================

/// Deduplicated storage of immutable text files.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Store `content` under `name` unless identical content already exists.
    ///
    /// Concurrent calls with identical content must all report the same id,
    /// with exactly one of them seeing `existed == false`.
    async fn store(&self, name: &str, content: &[u8]) -> Result<UploadOutcome>;

    /// Fetch a record by id.
    async fn get_by_id(&self, id: Uuid) -> Result<FileRecord>;

    /// Fetch a record by its content hash.
    async fn get_by_hash(&self, hash: &str) -> Result<FileRecord>;

    /// Check whether a record with this hash exists.
    async fn exists_by_hash(&self, hash: &str) -> Result<bool>;

    /// Remove a record. Analyses referencing it are left untouched.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Number of stored records.
    async fn count(&self) -> Result<i64>;
}

// =============================================================================
// ANALYSIS CACHE
// =============================================================================

/// Persistent memo of analysis results keyed by file id.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Look up the stored analysis for a file.
    async fn lookup(&self, file_id: Uuid) -> Result<CacheLookup>;

    /// Persist `record` unless one already exists for its file id.
    ///
    /// Returns whichever record is stored after the call, so a losing
    /// concurrent writer gets the winner's values.
    async fn insert_once(&self, record: AnalysisRecord) -> Result<AnalysisRecord>;

    /// Check whether an analysis is stored for the file.
    async fn exists(&self, file_id: Uuid) -> Result<bool>;

    /// Remove the stored analysis. Fails with `AnalysisNotFound` if absent.
    async fn delete(&self, file_id: Uuid) -> Result<()>;
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Read access to file content held by the content store.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the text of a stored file.
    ///
    /// Errors: `FileNotFound` when the store reports the id absent,
    /// `UpstreamUnavailable` when the store cannot be reached.
    async fn fetch_text(&self, file_id: Uuid) -> Result<String>;
}

/// External word-cloud rendering capability.
#[async_trait]
pub trait WordCloudRenderer: Send + Sync {
    /// Render `text` and return a URL or image reference.
    ///
    /// Errors: `RenderingFailed`.
    async fn render(&self, text: &str, options: &WordCloudOptions) -> Result<String>;
}
