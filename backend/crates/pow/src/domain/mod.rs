//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (ProofOfWorkChallenge, ProofOfWorkSolution)
//! - Domain value objects (Difficulty, DifficultySchedule)
//! - Domain services (PoW hashing, verification and solving)

pub mod entities;
pub mod services;
pub mod value_objects;
