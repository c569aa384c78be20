//! Domain Layer

pub mod claims;
