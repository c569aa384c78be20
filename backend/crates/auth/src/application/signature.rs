//! Submission-id signatures
//!
//! `X-Signature` is `base64(HMAC-SHA256(secret, submission_id))` computed over
//! the submission id exactly as sent in `X-Submission-ID`.

use platform::crypto::{from_base64, hmac_sha256, to_base64, verify_hmac_sha256};

/// `None` only when the secret cannot key an HMAC
pub fn sign_submission_id(secret: &[u8], submission_id: &str) -> Option<String> {
    hmac_sha256(secret, submission_id.as_bytes()).map(|tag| to_base64(&tag))
}

/// Constant-time check of a base64 signature; malformed base64 fails
pub fn verify_submission_signature(secret: &[u8], submission_id: &str, signature: &str) -> bool {
    match from_base64(signature.trim()) {
        Ok(tag) => verify_hmac_sha256(secret, submission_id.as_bytes(), &tag),
        Err(_) => false,
    }
}
