//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic.
//! Contains use case implementations and the load bookkeeping.

pub mod config;
pub mod issue_challenge;
pub mod load;
pub mod verify_solution;
