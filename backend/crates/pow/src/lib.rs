//! PoW (Proof of Work) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Challenge and solution entities, difficulty schedule, verification
//! - `application/` - Use cases and load tracking
//! - `presentation/` - HTTP handlers
//!
//! ## Security Model
//! - Challenges are stateless: nothing is stored between issue and verify
//! - A solution is honored for 60 seconds after its challenge was issued
//! - Difficulty rises with the number of accepted submissions in the current period
//! - The echoed difficulty is trusted only above the schedule's baseline

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PowConfig;
pub use application::issue_challenge::IssueChallengeUseCase;
pub use application::load::{LoadCounter, LoadResetTask};
pub use application::verify_solution::VerifySolutionUseCase;
pub use domain::entities::{ProofOfWorkChallenge, ProofOfWorkSolution};
pub use domain::services::solve;
pub use domain::value_objects::{Difficulty, DifficultySchedule};
pub use error::{PowError, PowResult};
pub use presentation::router::pow_router;
