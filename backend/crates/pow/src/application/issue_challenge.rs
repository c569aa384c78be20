//! Issue Challenge Use Case

use crate::application::config::PowConfig;
use crate::application::load::LoadCounter;
use crate::domain::entities::ProofOfWorkChallenge;
use platform::crypto::{random_bytes, to_hex};
use std::sync::Arc;

/// Issue Challenge Use Case
pub struct IssueChallengeUseCase {
    load: Arc<LoadCounter>,
    config: Arc<PowConfig>,
}

impl IssueChallengeUseCase {
    pub fn new(load: Arc<LoadCounter>, config: Arc<PowConfig>) -> Self {
        Self { load, config }
    }

    pub fn execute(&self) -> ProofOfWorkChallenge {
        self.execute_at(chrono::Utc::now().timestamp())
    }

    /// Issue a challenge stamped with `now` (unix seconds)
    pub fn execute_at(&self, now: i64) -> ProofOfWorkChallenge {
        let load = self.load.current();
        let difficulty = self.config.schedule.difficulty_for(load);
        let challenge = to_hex(&random_bytes(self.config.challenge_bytes_len));

        tracing::debug!(load, difficulty = difficulty.digits(), "Issued challenge");

        ProofOfWorkChallenge::new(challenge, difficulty, now)
    }
}
