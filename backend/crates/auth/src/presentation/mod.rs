//! Presentation Layer
//!
//! Header extraction for the submission endpoint.

pub mod headers;
