//! Domain Layer

pub mod entities;
pub mod model_catalog;
pub mod query;
pub mod repository;
