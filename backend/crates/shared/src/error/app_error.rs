//! Application Error
//!
//! [`AppError`] is the last stop before a rejection leaves the service:
//! a status class, the short message the client sees, and an optional
//! cause that only ever reaches the logs.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Cause = Box<dyn Error + Send + Sync + 'static>;

/// HTTP に返す直前のエラー
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::too_many_requests("Too many requests");
/// assert_eq!(err.kind(), ErrorKind::TooManyRequests);
/// assert_eq!(err.status_code(), 429);
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    cause: Option<Cause>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn too_many_requests(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::TooManyRequests, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// 原因を添付する（ログ専用、レスポンスには出ない）
    pub fn with_source<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Client-facing text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 5xx はストア障害などサーバー側の問題としてログに残す
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind.status_code())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Lookups that come back empty become 404s
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: impl Into<Cow<'static, str>>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_map_to_status() {
        let cases = [
            (AppError::bad_request("Invalid benchmark data"), 400),
            (AppError::unauthorized("Invalid signature"), 401),
            (AppError::not_found("Benchmark not found"), 404),
            (AppError::too_many_requests("IP address is rate limited"), 429),
            (AppError::internal("Storage error"), 500),
            (
                AppError::new(ErrorKind::ServiceUnavailable, "Storage unavailable"),
                503,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
            assert_eq!(err.is_server_error(), status >= 500);
        }
    }

    #[test]
    fn test_cause_is_kept_out_of_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "store timed out");
        let err = AppError::new(ErrorKind::ServiceUnavailable, "Storage unavailable")
            .with_source(io_err);

        assert_eq!(err.message(), "Storage unavailable");
        assert_eq!(err.to_string(), "Storage unavailable (503)");
        assert!(err.source().is_some());
        assert!(format!("{err:?}").contains("store timed out"));
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<u8> = None;
        let err = missing.ok_or_not_found("Benchmark not found").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Benchmark not found");

        assert_eq!(Some(7u8).ok_or_not_found("Benchmark not found").unwrap(), 7);
    }
}
