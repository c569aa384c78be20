//! Application Configuration
//!
//! Configuration for the PoW application layer.

use std::time::Duration;

use crate::domain::value_objects::DifficultySchedule;

/// PoW application configuration
#[derive(Debug, Clone)]
pub struct PowConfig {
    /// Challenge bytes length
    pub challenge_bytes_len: usize,
    /// How long an issued challenge stays solvable
    pub challenge_validity: Duration,
    /// Load-to-difficulty table
    pub schedule: DifficultySchedule,
    /// How often the accepted-submission load counter is zeroed
    pub load_reset_period: Duration,
}

impl Default for PowConfig {
    fn default() -> Self {
        Self {
            challenge_bytes_len: 32,
            challenge_validity: Duration::from_secs(60),
            schedule: DifficultySchedule::default(),
            load_reset_period: Duration::from_secs(60),
        }
    }
}

impl PowConfig {
    pub fn challenge_validity_secs(&self) -> i64 {
        i64::try_from(self.challenge_validity.as_secs()).unwrap_or(i64::MAX)
    }
}
