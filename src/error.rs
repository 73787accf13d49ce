//! Error types for the store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::cache::{KeyViolation, ValueViolation};
use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Errors raised by store operations.
///
/// All three are returned synchronously to the immediate caller. The store
/// never retries or suppresses them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Key fails the format constraint
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: KeyViolation },

    /// Value is not representable, or stored bytes cannot be parsed back
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Store is at capacity and a new key was offered
    #[error("Quota exceeded: store is full ({max_size} keys), cannot admit '{key}'")]
    QuotaExceeded { key: String, max_size: usize },
}

impl StoreError {
    /// Whether the caller may reasonably retry the same write later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

impl From<ValueViolation> for StoreError {
    fn from(violation: ValueViolation) -> Self {
        StoreError::Serialization(violation.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// == Api Error Enum ==
/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Key not found (or expired)
    #[error("Key not found: {0}")]
    NotFound(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::InvalidKey { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::Serialization(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::QuotaExceeded { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
