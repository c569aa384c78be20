//! Verify Solution Use Case

use crate::application::config::PowConfig;
use crate::domain::entities::ProofOfWorkSolution;
use crate::domain::services::verify_at;
use crate::error::PowResult;
use std::sync::Arc;

/// Verify Solution Use Case
///
/// Stateless: the challenge is trusted only as far as its age, its echoed
/// difficulty floor and the work carried by the hash.
#[derive(Clone)]
pub struct VerifySolutionUseCase {
    config: Arc<PowConfig>,
}

impl VerifySolutionUseCase {
    pub fn new(config: Arc<PowConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, solution: &ProofOfWorkSolution) -> PowResult<()> {
        self.execute_at(solution, chrono::Utc::now().timestamp())
    }

    pub fn execute_at(&self, solution: &ProofOfWorkSolution, now: i64) -> PowResult<()> {
        verify_at(
            solution,
            now,
            self.config.challenge_validity_secs(),
            self.config.schedule.baseline(),
        )
    }
}
