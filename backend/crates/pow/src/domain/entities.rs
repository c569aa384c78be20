//! Domain Entities
//!
//! Core business entities for the PoW domain. Challenges are stateless:
//! the server never stores them, clients echo them back with the solution.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Difficulty;

/// Challenge issued to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfWorkChallenge {
    /// 32 random bytes, lowercase hex
    pub challenge: String,
    /// Required number of leading `'0'` hex characters
    pub difficulty: u8,
    /// Issue time, unix seconds
    pub timestamp: i64,
}

impl ProofOfWorkChallenge {
    pub fn new(challenge: String, difficulty: Difficulty, issued_at: i64) -> Self {
        Self {
            challenge,
            difficulty: difficulty.digits(),
            timestamp: issued_at,
        }
    }
}

/// Solution echoed back inside a benchmark submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfWorkSolution {
    pub challenge: String,
    /// Decimal integer, as a string
    pub nonce: String,
    pub timestamp: i64,
    pub difficulty: u8,
}

impl ProofOfWorkSolution {
    pub fn for_challenge(challenge: &ProofOfWorkChallenge, nonce: u64) -> Self {
        Self {
            challenge: challenge.challenge.clone(),
            nonce: nonce.to_string(),
            timestamp: challenge.timestamp,
            difficulty: challenge.difficulty,
        }
    }
}
