//! Error Kind
//!
//! The coarse status class of a rejection. The reason itself travels in
//! the message, so only statuses the ingestion service can answer with
//! are listed here.

use std::fmt;

use serde::Serialize;

/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::TooManyRequests.status_code(), 429);
/// assert_eq!(ErrorKind::TooManyRequests.to_string(), "Too Many Requests");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// ペイロード・スキーマ・ドメイン検証の失敗
    BadRequest,
    /// トークン、署名、リプレイ、復号、PoW
    Unauthorized,
    NotFound,
    /// グローバルまたは送信元ごとのスロットル
    TooManyRequests,
    InternalServerError,
    /// ストアのタイムアウト・接続不可
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    const fn reason(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
            Self::TooManyRequests => "Too Many Requests",
            Self::InternalServerError => "Internal Server Error",
            Self::ServiceUnavailable => "Service Unavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
