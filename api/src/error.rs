//! API error handling.
//!
//! Every failure leaves the server as a JSON body of the form
//! `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::ingest::IngestError;
use shared::storage::LogStoreError;
use shared::validation::ValidationError;
use thiserror::Error;
use tokio::task::JoinError;

/// Message returned when storage fails.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned for unclassified failures.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Something went wrong!";

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request violated a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// The store failed to persist an entry.
    #[error(transparent)]
    Storage(#[from] LogStoreError),

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] JoinError),

    /// The request body exceeded the configured limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// No route matched the request.
    #[error("Route not found")]
    NotFound,
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Validation(e) => Self::Validation(e),
            IngestError::Storage(e) => Self::Storage(e),
        }
    }
}

impl ApiError {
    /// Returns the HTTP status this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::Validation(_) | Self::BadRequest(_) | Self::PayloadTooLarge | Self::NotFound => {
                self.to_string()
            }
            Self::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            Self::Task(err) => {
                tracing::error!(error = %err, "Request task failed");
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Result type of fallible handlers.
pub type ApiResult<T> = Result<T, ApiError>;
