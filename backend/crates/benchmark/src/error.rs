//! Benchmark Error Types
//!
//! This module provides ingestion and storage error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use pow::PowError;
use std::fmt;
use thiserror::Error;

/// Ingestion result type alias
pub type IngestResult<T> = Result<T, IngestError>;

/// Storage result type alias
pub type StorageResult<T> = Result<T, StorageError>;

/// Which throttle turned a request away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    Global,
    Source,
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLimitScope::Global => f.write_str("global"),
            RateLimitScope::Source => f.write_str("source"),
        }
    }
}

/// Store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Round trip exceeded the per-call deadline
    #[error("Storage call timed out")]
    Timeout,

    /// Store unreachable (pool exhausted or closed, I/O failure)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Any other query failure
    #[error("Storage error: {0}")]
    Query(String),
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Timeout | StorageError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Timeout | StorageError::Unavailable(_) => ErrorKind::ServiceUnavailable,
            StorageError::Query(_) => ErrorKind::InternalServerError,
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Unavailable(err.to_string())
            }
            _ => StorageError::Query(err.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let message = match err.kind() {
            ErrorKind::ServiceUnavailable => "Storage unavailable",
            _ => "Storage error",
        };
        AppError::new(err.kind(), message).with_source(err)
    }
}

/// Why a submission was rejected
///
/// Every variant is terminal. Messages are what the client sees.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Submission id already recorded
    #[error("Not a unique submission")]
    Replay,

    #[error("Invalid signature")]
    Signature,

    /// Envelope could not be opened; the cause is never disclosed
    #[error("Decryption failed")]
    Decryption,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Pow(#[from] PowError),

    #[error("Rate limit exceeded ({0})")]
    RateLimited(RateLimitScope),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IngestError {
    pub fn validation(message: impl Into<String>) -> Self {
        IngestError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::Auth(e) => e.status_code(),
            IngestError::Pow(e) => e.status_code(),
            IngestError::Storage(e) => e.status_code(),
            IngestError::Replay | IngestError::Signature | IngestError::Decryption => {
                StatusCode::UNAUTHORIZED
            }
            IngestError::Validation(_) => StatusCode::BAD_REQUEST,
            IngestError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::Auth(e) => e.kind(),
            IngestError::Pow(e) => e.kind(),
            IngestError::Storage(e) => e.kind(),
            IngestError::Replay | IngestError::Signature | IngestError::Decryption => {
                ErrorKind::Unauthorized
            }
            IngestError::Validation(_) => ErrorKind::BadRequest,
            IngestError::RateLimited(_) => ErrorKind::TooManyRequests,
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Auth(e) => e.into(),
            IngestError::Pow(e) => e.into(),
            IngestError::Storage(e) => e.into(),
            IngestError::RateLimited(RateLimitScope::Source) => {
                AppError::too_many_requests("IP address is rate limited")
            }
            IngestError::RateLimited(RateLimitScope::Global) => {
                AppError::too_many_requests("Too many requests")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
