//! HTTP error mapping.
//!
//! | Core error | Status |
//! |------------|--------|
//! | `InvalidInput`, `AnalysisFailed` | 400 |
//! | `NotFound`, `FileNotFound`, `AnalysisNotFound` | 404 |
//! | `UpstreamUnavailable`, `RenderingFailed` | 502 |
//! | anything else | 500 |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use docstat_core::Error;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Internal(Error),
    NotFound(String),
    BadRequest(String),
    BadGateway(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::FileNotFound(_) | Error::AnalysisNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::AnalysisFailed { .. } => ApiError::BadRequest(err.to_string()),
            Error::UpstreamUnavailable(_) | Error::RenderingFailed(_) => {
                ApiError::BadGateway(err.to_string())
            }
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(err) => {
                error!(subsystem = "api", error = %err, "Request failed");
                err.to_string()
            }
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::BadGateway(msg) => msg,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
