//! HTTP handlers for the Crop Advisor API

pub mod health;
pub mod recommendation;

pub use health::{health_check, root};
pub use recommendation::recommend_crop;
