//! HTTP handlers for both services.

pub mod analysis;
pub mod files;
pub mod health;

use uuid::Uuid;

use crate::ApiError;

/// Parse a path segment as a UUID, answering 400 on failure.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::BadRequest(format!("Invalid file id: {}", raw)))
}
