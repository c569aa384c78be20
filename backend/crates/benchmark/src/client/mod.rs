//! Submitting side of the protocol
//!
//! Builds the headers and encrypted body a client posts to
//! `/submit-benchmark`: solve the challenge, stamp the submission id, seal
//! the payload for the server's key, then sign the id.

use auth::{AuthError, AuthGate};
use axum::http::HeaderMap;
use kernel::id::SubmissionId;
use platform::envelope::{self, EnvelopeError};
use pow::{ProofOfWorkChallenge, ProofOfWorkSolution};
use rsa::RsaPublicKey;
use thiserror::Error;

use crate::domain::entities::BenchmarkResult;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to encode benchmark: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Ready-to-send submission
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub submission_id: SubmissionId,
    pub headers: HeaderMap,
    /// JSON-encoded envelope
    pub body: Vec<u8>,
}

/// Complete a benchmark for submission under `challenge`
pub fn prepare_submission(
    result: BenchmarkResult,
    challenge: &ProofOfWorkChallenge,
    server_key: &RsaPublicKey,
    gate: &AuthGate,
) -> Result<PreparedSubmission, ClientError> {
    prepare_submission_as(SubmissionId::new(), result, challenge, server_key, gate)
}

/// Same as [`prepare_submission`] with a caller-chosen id and fresh credentials
pub fn prepare_submission_as(
    submission_id: SubmissionId,
    mut result: BenchmarkResult,
    challenge: &ProofOfWorkChallenge,
    server_key: &RsaPublicKey,
    gate: &AuthGate,
) -> Result<PreparedSubmission, ClientError> {
    let nonce = pow::solve(&challenge.challenge, challenge.difficulty);
    result.proof_of_work = ProofOfWorkSolution::for_challenge(challenge, nonce);

    result.submission_id = submission_id.to_string();

    let plaintext = serde_json::to_vec(&result)?;
    let sealed = envelope::seal(&plaintext, server_key)?;
    let body = serde_json::to_vec(&sealed)?;

    let mut headers = HeaderMap::new();
    gate.credentials_for(&submission_id)?.apply(&mut headers)?;
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("application/json"),
    );

    Ok(PreparedSubmission {
        submission_id,
        headers,
        body,
    })
}
