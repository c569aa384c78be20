//! Application Layer - Use Cases
//!
//! Token minting and validation, submission-id signatures, and the gate
//! composing them.

pub mod config;
pub mod gate;
pub mod signature;
pub mod token;
