//! Submit Benchmark Use Case
//!
//! The ingestion pipeline. Cheap checks run before expensive ones: the token
//! and signature are verified and the id is checked for replay before any
//! RSA work, and the per-source budget is only charged for submissions that
//! are otherwise valid. Nothing is persisted unless every stage passes.

use auth::AuthGate;
use axum::body::Bytes;
use axum::http::HeaderMap;
use chrono::Utc;
use kernel::id::SubmissionId;
use platform::envelope::{self, SubmissionEnvelope};
use pow::{LoadCounter, VerifySolutionUseCase};
use rsa::RsaPrivateKey;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use crate::application::replay_guard::{ReplayGuard, Reservation};
use crate::application::throttle::AbuseThrottle;
use crate::domain::entities::{BenchmarkResult, SubmissionRecord};
use crate::domain::repository::BenchmarkRepository;
use crate::error::{IngestError, IngestResult, RateLimitScope};

/// Last stage a submission passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Received,
    Authenticated,
    RateAdmitted,
    Decrypted,
    SchemaValid,
    PowVerified,
    SourceAdmitted,
    Persisted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Authenticated => "authenticated",
            Stage::RateAdmitted => "rate_admitted",
            Stage::Decrypted => "decrypted",
            Stage::SchemaValid => "schema_valid",
            Stage::PowVerified => "pow_verified",
            Stage::SourceAdmitted => "source_admitted",
            Stage::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Input DTO for a submission
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Address the per-source budget is charged to
    pub client_ip: IpAddr,
}

/// Submit Benchmark Use Case
pub struct SubmitBenchmarkUseCase<R>
where
    R: BenchmarkRepository,
{
    gate: Arc<AuthGate>,
    replay: ReplayGuard<R>,
    throttle: Arc<AbuseThrottle>,
    private_key: Arc<RsaPrivateKey>,
    pow: VerifySolutionUseCase,
    load: Arc<LoadCounter>,
}

impl<R> SubmitBenchmarkUseCase<R>
where
    R: BenchmarkRepository,
{
    pub fn new(
        gate: Arc<AuthGate>,
        replay: ReplayGuard<R>,
        throttle: Arc<AbuseThrottle>,
        private_key: Arc<RsaPrivateKey>,
        pow: VerifySolutionUseCase,
        load: Arc<LoadCounter>,
    ) -> Self {
        Self {
            gate,
            replay,
            throttle,
            private_key,
            pow,
            load,
        }
    }

    pub async fn execute(&self, request: SubmissionRequest) -> IngestResult<SubmissionId> {
        let mut stage = Stage::Received;
        let result = self.run(&request, &mut stage).await;

        match &result {
            Ok(submission_id) => {
                tracing::info!(
                    %submission_id,
                    client_ip = %request.client_ip,
                    "Benchmark submission accepted"
                );
            }
            Err(IngestError::Storage(e)) => {
                tracing::error!(%stage, client_ip = %request.client_ip, error = %e, "Benchmark submission failed");
            }
            Err(e) => {
                match e {
                    IngestError::Auth(inner) => inner.log(),
                    IngestError::Pow(inner) => inner.log(),
                    _ => {}
                }
                tracing::warn!(%stage, client_ip = %request.client_ip, error = %e, "Benchmark submission rejected");
            }
        }

        result
    }

    async fn run(&self, request: &SubmissionRequest, stage: &mut Stage) -> IngestResult<SubmissionId> {
        let submission = self.gate.authenticate(&request.headers)?;
        if !self.gate.verify_signature(&submission, &request.headers) {
            return Err(IngestError::Signature);
        }
        let submission_id = submission.submission_id;
        if self.replay.reserve(submission_id).await? == Reservation::AlreadySeen {
            return Err(IngestError::Replay);
        }
        *stage = Stage::Authenticated;

        if !self.throttle.admit_global() {
            return Err(IngestError::RateLimited(RateLimitScope::Global));
        }
        *stage = Stage::RateAdmitted;

        let sealed: SubmissionEnvelope = serde_json::from_slice(&request.body)
            .map_err(|_| IngestError::validation("Invalid payload format"))?;
        let plaintext =
            envelope::open(&sealed, &self.private_key).map_err(|_| IngestError::Decryption)?;
        *stage = Stage::Decrypted;

        let result: BenchmarkResult = serde_json::from_slice(&plaintext)
            .map_err(|_| IngestError::validation("Invalid benchmark data"))?;
        result.validate().map_err(IngestError::validation)?;
        *stage = Stage::SchemaValid;

        self.pow.execute(&result.proof_of_work)?;
        *stage = Stage::PowVerified;

        if !self.throttle.admit_source(request.client_ip) {
            return Err(IngestError::RateLimited(RateLimitScope::Source));
        }
        *stage = Stage::SourceAdmitted;

        let record = SubmissionRecord::new(submission_id, result, request.client_ip, Utc::now());
        self.replay.commit(&record).await?;
        *stage = Stage::Persisted;

        self.load.increment();
        Ok(submission_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(Stage::Received < Stage::Authenticated);
        assert!(Stage::SchemaValid < Stage::PowVerified);
        assert!(Stage::SourceAdmitted < Stage::Persisted);
        assert_eq!(Stage::PowVerified.to_string(), "pow_verified");
    }
}
