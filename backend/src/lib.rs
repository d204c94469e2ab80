//! Crop Advisor - Backend Server
//!
//! Recommends a crop to a farmer from soil nutrients, recent weather and
//! local market prices, using a decision forest trained offline.

use std::{sync::Arc, time::Duration};

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use error::{AppError, AppResult};
use external::{DataGovMarketClient, OpenMeteoClient, WeatherProvider};
use services::{
    CachedWeatherProvider, CropClassifier, GuidanceCatalog, LoadedModel, MarketCommodity,
    RecommendationService,
};

/// Provenance of the loaded crop model
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub fingerprint: String,
    pub trees: usize,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
    pub model_info: Option<ModelInfo>,
}

impl AppState {
    pub fn new(recommendations: RecommendationService) -> Self {
        Self {
            recommendations: Arc::new(recommendations),
            model_info: None,
        }
    }

    pub fn with_model_info(mut self, model_info: ModelInfo) -> Self {
        self.model_info = Some(model_info);
        self
    }

    /// Wire providers, classifier and guidance from configuration.
    ///
    /// A model that fails to load is logged and leaves the service running
    /// without prediction.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .user_agent(concat!("crop-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        let open_meteo: Arc<dyn WeatherProvider> =
            Arc::new(OpenMeteoClient::new(http.clone(), &config.weather));
        let weather: Arc<dyn WeatherProvider> = if config.weather.cache_ttl_secs > 0 {
            tracing::info!(
                ttl_secs = config.weather.cache_ttl_secs,
                "Weather cache enabled"
            );
            Arc::new(CachedWeatherProvider::new(
                open_meteo,
                Duration::from_secs(config.weather.cache_ttl_secs),
                config.weather.cache_capacity,
            ))
        } else {
            open_meteo
        };

        if config.market.api_key.is_empty() {
            tracing::warn!("Market API key not configured, price lookups will fail");
        }
        let market = Arc::new(DataGovMarketClient::new(http, &config.market));

        let (classifier, model_info) = match LoadedModel::load(&config.model.path) {
            Ok(model) => {
                tracing::info!(
                    path = %config.model.path,
                    trees = model.forest.tree_count(),
                    fingerprint = %model.fingerprint,
                    "Crop model loaded"
                );
                let info = ModelInfo {
                    fingerprint: model.fingerprint,
                    trees: model.forest.tree_count(),
                };
                let classifier: Arc<dyn CropClassifier> = Arc::new(model.forest);
                (Some(classifier), Some(info))
            }
            Err(e) => {
                tracing::error!(
                    path = %config.model.path,
                    "Crop model could not be loaded, predictions are disabled: {}",
                    e
                );
                (None, None)
            }
        };

        let recommendations = RecommendationService::new(
            weather,
            market,
            classifier,
            Arc::new(GuidanceCatalog::builtin()),
        )
        .with_market_commodity(MarketCommodity::from_config(
            config.market.commodity_source,
            &config.market.commodity,
        ));

        Ok(Self {
            recommendations: Arc::new(recommendations),
            model_info,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
