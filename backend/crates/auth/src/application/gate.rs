//! Auth Gate
//!
//! First stage of the submission pipeline: who is submitting, and for
//! which submission id.

use axum::http::{HeaderMap, HeaderValue};
use kernel::id::SubmissionId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::signature::{sign_submission_id, verify_submission_signature};
use crate::application::token::TokenService;
use crate::domain::claims::Claims;
use crate::error::{AuthError, AuthResult};
use crate::presentation::headers as request_headers;

/// A request whose token is valid and bound to its `X-Submission-ID`
#[derive(Debug, Clone)]
pub struct AuthenticatedSubmission {
    pub submission_id: SubmissionId,
    /// Header value exactly as sent; the signature covers these bytes
    pub raw_submission_id: String,
    pub claims: Claims,
}

#[derive(Clone)]
pub struct AuthGate {
    config: Arc<AuthConfig>,
    tokens: TokenService,
}

impl AuthGate {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            tokens: TokenService::new(config.clone()),
            config,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Validate the bearer token and bind it to `X-Submission-ID`
    ///
    /// The token's `nonce` claim and the header must name the same id.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<AuthenticatedSubmission> {
        let token = request_headers::bearer_token(headers).ok_or(AuthError::MissingToken)?;
        let claims = self.tokens.validate(token)?;

        let raw = request_headers::submission_id(headers).ok_or(AuthError::MissingSubmissionId)?;
        let submission_id: SubmissionId =
            raw.parse().map_err(|_| AuthError::InvalidSubmissionId)?;

        let nonce: SubmissionId = claims
            .nonce
            .parse()
            .map_err(|_| AuthError::NonceMismatch)?;
        if nonce != submission_id {
            return Err(AuthError::NonceMismatch);
        }

        Ok(AuthenticatedSubmission {
            submission_id,
            raw_submission_id: raw.to_string(),
            claims,
        })
    }

    /// Check `X-Signature` for an authenticated submission
    pub fn verify_signature(&self, submission: &AuthenticatedSubmission, headers: &HeaderMap) -> bool {
        request_headers::signature(headers).is_some_and(|signature| {
            verify_submission_signature(
                &self.config.secret,
                &submission.raw_submission_id,
                signature,
            )
        })
    }

    /// Client side: token and signature for a new submission
    pub fn credentials_for(&self, submission_id: &SubmissionId) -> AuthResult<SubmissionCredentials> {
        let id = submission_id.to_string();
        let signature = sign_submission_id(&self.config.secret, &id)
            .ok_or_else(|| AuthError::Internal("secret rejected as HMAC key".into()))?;
        Ok(SubmissionCredentials {
            token: self.tokens.issue(&id)?,
            signature,
            submission_id: id,
        })
    }
}

/// Header values a client sends with a submission
#[derive(Debug, Clone)]
pub struct SubmissionCredentials {
    pub token: String,
    pub submission_id: String,
    pub signature: String,
}

impl SubmissionCredentials {
    /// Write `Authorization`, `X-Submission-ID` and `X-Signature`
    pub fn apply(&self, headers: &mut HeaderMap) -> AuthResult<()> {
        fn value(s: &str) -> AuthResult<HeaderValue> {
            HeaderValue::from_str(s)
                .map_err(|_| AuthError::Internal("header value is not visible ASCII".to_string()))
        }

        headers.insert(
            axum::http::header::AUTHORIZATION,
            value(&format!("Bearer {}", self.token))?,
        );
        headers.insert(request_headers::SUBMISSION_ID_HEADER, value(&self.submission_id)?);
        headers.insert(request_headers::SIGNATURE_HEADER, value(&self.signature)?);
        Ok(())
    }
}
