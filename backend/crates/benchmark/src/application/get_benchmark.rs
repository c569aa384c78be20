//! Get Benchmark Use Case

use kernel::error::app_error::{AppError, AppResult, OptionExt};
use kernel::id::SubmissionId;
use std::sync::Arc;
use std::time::Duration;

use crate::application::store_timeout::with_timeout;
use crate::domain::entities::BenchmarkResult;
use crate::domain::repository::BenchmarkRepository;

pub struct GetBenchmarkUseCase<R>
where
    R: BenchmarkRepository,
{
    repo: Arc<R>,
    timeout: Duration,
}

impl<R> GetBenchmarkUseCase<R>
where
    R: BenchmarkRepository,
{
    pub fn new(repo: Arc<R>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    /// A malformed id is reported the same way as an unknown one
    pub async fn execute(&self, raw_id: &str) -> AppResult<BenchmarkResult> {
        let Ok(submission_id) = raw_id.parse::<SubmissionId>() else {
            return Err(AppError::not_found("Benchmark not found"));
        };

        let found = with_timeout(self.timeout, self.repo.find(submission_id)).await?;
        found
            .map(|result| result.redacted())
            .ok_or_not_found("Benchmark not found")
    }
}
