//! # API Error Types
//!
//! [`ApiError`] covers everything that is **not** a verification verdict.
//! Verdicts — `ok: true` or `ok: false` — are normal 200 responses;
//! infrastructure failures from the pipeline map to 502, bad requests to
//! 422. Internal and upstream error details are logged but never exposed
//! to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use prov_pipeline::PipelineError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "UPSTREAM_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type implementing [`IntoResponse`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request is missing parts or contains invalid values (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A pipeline collaborator (ledger RPC, metadata host) failed (502).
    /// Details are logged, not returned.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Internal server error (500). Details are logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose upstream/internal details to clients.
        let message = match &self {
            Self::Upstream(_) => "An upstream service error occurred".to_string(),
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Upstream(_) => tracing::error!(error = %self, "upstream failure"),
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Infrastructure failures from the pipeline are upstream failures: the
/// service could not determine an answer, which is distinct from a
/// negative verdict.
impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self::Upstream(err.to_string())
    }
}
