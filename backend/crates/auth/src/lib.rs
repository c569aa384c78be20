//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Token claims
//! - `application/` - Token service, signatures, auth gate
//! - `presentation/` - Header parsing
//!
//! ## Security Model
//! - Every submission carries a short-lived HS256 token whose `nonce` claim
//!   is the submission id
//! - `X-Submission-ID` must equal that nonce
//! - `X-Signature` is an HMAC-SHA256 of the submission id under the same
//!   shared secret
//! - Any algorithm other than HS256 is refused

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::gate::{AuthGate, AuthenticatedSubmission, SubmissionCredentials};
pub use application::signature::{sign_submission_id, verify_submission_signature};
pub use application::token::TokenService;
pub use domain::claims::Claims;
pub use error::{AuthError, AuthResult};

#[cfg(test)]
mod tests;
