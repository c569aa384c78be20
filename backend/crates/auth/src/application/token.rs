//! Submission Tokens
//!
//! Short-lived HS256 JWTs binding a request to one submission id.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::claims::Claims;
use crate::error::{AuthError, AuthResult};

/// Mints and validates submission tokens
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Mint a token for `nonce`, valid for the configured lifetime
    pub fn issue(&self, nonce: &str) -> AuthResult<String> {
        self.issue_at(nonce, chrono::Utc::now().timestamp())
    }

    pub fn issue_at(&self, nonce: &str, now: i64) -> AuthResult<String> {
        let claims = Claims::new(nonce, now, self.config.token_ttl_secs());
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.config.secret),
        )
        .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Validate signature, algorithm and expiry; return the claims
    ///
    /// Only HS256 is accepted. `exp` and `nonce` are required.
    pub fn validate(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_secs;
        validation.set_required_spec_claims(&["exp"]);

        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.config.secret),
            &validation,
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(secret: &[u8]) -> TokenService {
        TokenService::new(Arc::new(AuthConfig::with_secret(secret.to_vec())))
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn test_issue_then_validate() {
        let tokens = service(b"secret");
        let token = tokens.issue("3f1c2a4e-0000-4000-8000-000000000001").unwrap();
        let claims = tokens.validate(&token).unwrap();

        assert_eq!(claims.nonce, "3f1c2a4e-0000-4000-8000-000000000001");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service(b"secret").issue("n").unwrap();
        assert_eq!(service(b"other").validate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_rejected() {
        let tokens = service(b"secret");
        let token = tokens.issue_at("n", now() - 120).unwrap();
        assert_eq!(tokens.validate(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let claims = Claims::new("n", now(), 60);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert_eq!(service(b"secret").validate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_missing_claims_rejected() {
        let key = EncodingKey::from_secret(b"secret");
        let header = Header::new(Algorithm::HS256);

        let no_nonce = jsonwebtoken::encode(&header, &json!({ "iat": now(), "exp": now() + 60 }), &key)
            .unwrap();
        assert_eq!(service(b"secret").validate(&no_nonce), Err(AuthError::InvalidToken));

        let no_exp = jsonwebtoken::encode(&header, &json!({ "iat": now(), "nonce": "n" }), &key)
            .unwrap();
        assert_eq!(service(b"secret").validate(&no_exp), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(service(b"secret").validate("not.a.jwt"), Err(AuthError::InvalidToken));
        assert_eq!(service(b"secret").validate(""), Err(AuthError::InvalidToken));
    }
}
