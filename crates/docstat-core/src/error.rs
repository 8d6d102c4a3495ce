//! Error types for docstat.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using docstat's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for docstat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored file not found
    #[error("File not found with ID: {0}")]
    FileNotFound(Uuid),

    /// No analysis result stored for the file
    #[error("Analysis result not found with file ID: {0}")]
    AnalysisNotFound(Uuid),

    /// Invalid input (empty upload, wrong media type, blank content)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The content store could not be reached or answered with a server error
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The external word-cloud renderer failed
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Analysis of a file failed; the cause is kept for diagnostics
    #[error("Analysis failed for file {file_id}: {source}")]
    AnalysisFailed {
        file_id: Uuid,
        #[source]
        source: Box<Error>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap a pipeline failure so it identifies the file being analysed.
    ///
    /// Already-wrapped errors are returned unchanged.
    pub fn analysis_failed(file_id: Uuid, source: Error) -> Self {
        match source {
            Error::AnalysisFailed { .. } => source,
            other => Error::AnalysisFailed {
                file_id,
                source: Box::new(other),
            },
        }
    }

    /// True for every "resource is absent" variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::FileNotFound(_) | Error::AnalysisNotFound(_)
        )
    }

    /// The innermost error of an `AnalysisFailed` chain (or `self`).
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::AnalysisFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Error::NotFound("No matching row".to_string()),
            other => Error::Database(other),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
