//! Domain models for the Crop Advisor service

mod crop;
mod market;
mod recommendation;
mod soil;
mod weather;

pub use crop::*;
pub use market::*;
pub use recommendation::*;
pub use soil::*;
pub use weather::*;
