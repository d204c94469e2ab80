//! Shared types and models for the Crop Advisor service
//!
//! This crate contains the domain types exchanged between the recommendation
//! backend, its data providers and API clients.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
