//! Token Claims

use serde::{Deserialize, Serialize};

/// Claims carried by a submission token
///
/// `nonce` is the submission id the token was minted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
    pub nonce: String,
}

impl Claims {
    pub fn new(nonce: impl Into<String>, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
            nonce: nonce.into(),
        }
    }
}
