//! Error types for the pack calculator
//!
//! One thiserror enum per layer, plus the HTTP mapping for API errors.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error ==
/// Failures of the key/value store backing the result cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Key or value rejected by the store
    #[error("Invalid key or value: {0}")]
    InvalidKey(String),

    /// Store is full and eviction failed
    #[error("Store full: {0}")]
    Full(String),
}

// == Cache Error ==
/// Failures surfaced by the result cache. Always advisory: callers log them.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing store call failed
    #[error("Cache store error: {0}")]
    Store(#[from] StoreError),

    /// Backing store call exceeded its time budget
    #[error("Cache store timed out after {0:?}")]
    Timeout(Duration),

    /// Entry could not be encoded
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Repository Error ==
/// Failures of the configuration/history repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Rejected pack size set
    #[error("Invalid pack sizes: {0:?}")]
    InvalidPackSizes(Vec<i64>),

    /// A pack size above the configured maximum
    #[error("Pack size {size} exceeds maximum of {max}")]
    PackSizeTooLarge { size: i64, max: i64 },
}

// == API Error ==
/// Errors returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type CacheResult<T> = std::result::Result<T, CacheError>;
pub type RepoResult<T> = std::result::Result<T, RepoError>;
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
