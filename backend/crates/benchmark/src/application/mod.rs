//! Application Layer - Use Cases
//!
//! Orchestrates ingestion and the read endpoints on top of the domain layer.

pub mod config;
pub mod get_benchmark;
pub mod list_benchmarks;
pub mod maintenance;
pub mod read_cache;
pub mod replay_guard;
pub mod store_timeout;
pub mod submit_benchmark;
pub mod throttle;
