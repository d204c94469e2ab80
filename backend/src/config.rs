//! Configuration management for the Crop Advisor service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Outbound HTTP configuration shared by all providers
    pub http: HttpConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Market price API configuration
    pub market: MarketConfig,

    /// Crop classifier configuration
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout applied to every outbound request, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Historical (archive) weather endpoint
    pub archive_url: String,

    /// Forecast weather endpoint
    pub forecast_url: String,

    /// Length of the trailing history window in days
    pub history_days: i64,

    /// Number of forecast days to request
    pub forecast_days: u32,

    /// Lifetime of cached live summaries in seconds; 0 disables the cache
    pub cache_ttl_secs: u64,

    /// Maximum number of cached locations
    pub cache_capacity: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    /// Price records API base endpoint
    pub api_endpoint: String,

    /// Resource identifier of the daily mandi price dataset
    pub resource_id: String,

    /// API key for the price records API
    pub api_key: String,

    /// Records requested per lookup
    pub page_limit: u32,

    /// Commodity looked up when `commodity_source` is `fixed`
    pub commodity: String,

    /// Which commodity the market lookup is made for
    pub commodity_source: CommoditySource,
}

/// Source of the commodity name used for the market lookup
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommoditySource {
    /// Configured commodity, looked up alongside the weather before prediction
    Fixed,
    /// Predicted crop, looked up after inference
    Predicted,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Path to the serialized crop classifier
    pub path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("http.timeout_secs", 15)?
            .set_default(
                "weather.archive_url",
                "https://archive-api.open-meteo.com/v1/archive",
            )?
            .set_default("weather.forecast_url", "https://api.open-meteo.com/v1/forecast")?
            .set_default("weather.history_days", 30)?
            .set_default("weather.forecast_days", 7)?
            .set_default("weather.cache_ttl_secs", 0)?
            .set_default("weather.cache_capacity", 1024)?
            .set_default("market.api_endpoint", "https://api.data.gov.in/resource")?
            .set_default("market.resource_id", "35985678-0d79-46b4-9ed6-6f13308a1d24")?
            .set_default("market.api_key", "")?
            .set_default("market.page_limit", 500)?
            .set_default("market.commodity", "Rice")?
            .set_default("market.commodity_source", "fixed")?
            .set_default("model.path", "models/crop_model.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
