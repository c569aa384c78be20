//! API DTOs (Data Transfer Objects)

use serde::Serialize;

use crate::domain::entities::ProofOfWorkChallenge;

/// Response for GET /api/pow-challenge
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeResponse {
    pub challenge: String,
    pub difficulty: u8,
    pub timestamp: i64,
}

impl From<ProofOfWorkChallenge> for ChallengeResponse {
    fn from(c: ProofOfWorkChallenge) -> Self {
        Self {
            challenge: c.challenge,
            difficulty: c.difficulty,
            timestamp: c.timestamp,
        }
    }
}
