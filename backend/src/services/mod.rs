//! Business logic services for the Crop Advisor service

pub mod classifier;
pub mod guidance;
pub mod recommendation;
pub mod soil;
pub mod weather_cache;

pub use classifier::{CropClassifier, LoadedModel, ModelLoadError, RandomForest};
pub use guidance::{select_plan, GuidanceCatalog, GuidanceEntry};
pub use recommendation::{MarketCommodity, RecommendationService};
pub use soil::estimate_soil;
pub use weather_cache::CachedWeatherProvider;
