//! Kernel
//!
//! Vocabulary every ingestion crate agrees on: the submission id, and the
//! error type rejections are rendered through.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
