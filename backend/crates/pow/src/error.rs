//! PoW Error Types
//!
//! Why a proof-of-work solution was refused. The variants only reach the
//! logs; clients always get the same 401 body.

use axum::http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type PowResult<T> = Result<T, PowError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowError {
    /// Older than the validity window
    #[error("Challenge expired")]
    ChallengeExpired,

    #[error("Challenge timestamp is in the future")]
    TimestampInFuture,

    /// Echoed difficulty undercuts the schedule's baseline
    #[error("Difficulty {got} below minimum {min}")]
    DifficultyTooLow { got: u8, min: u8 },

    /// Digest lacks the required leading zeros
    #[error("Invalid nonce: hash does not meet difficulty requirement")]
    InvalidNonce,
}

impl PowError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Unauthorized
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    /// Stale challenges are routine; forged work is worth a warning
    pub fn log(&self) {
        if matches!(self, Self::InvalidNonce | Self::DifficultyTooLow { .. }) {
            tracing::warn!(error = %self, "PoW verification failed");
        } else {
            tracing::debug!(error = %self, "PoW challenge rejected");
        }
    }
}

impl From<PowError> for AppError {
    fn from(err: PowError) -> Self {
        AppError::new(err.kind(), "Invalid proof-of-work solution").with_source(err)
    }
}
