//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Hybrid RSA-OAEP / AES-GCM submission envelopes
//! - Rate limiting infrastructure
//! - Client address resolution

pub mod client;
pub mod crypto;
pub mod envelope;
pub mod rate_limit;
