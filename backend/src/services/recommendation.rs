//! Crop recommendation service
//!
//! Combines weather history, soil nutrients and market prices into a
//! classifier input, runs the crop classifier and dresses the prediction up
//! with cultivation guidance.

use std::sync::Arc;

use shared::{
    round_to, Crop, FeatureVector, InputDataSummary, MarketData, ProcessedWeatherData,
    RecommendationRequest, RecommendationResponse, SoilEstimate, WeatherSummary,
};

use crate::config::CommoditySource;
use crate::error::{AppError, AppResult};
use crate::external::{MarketLookup, MarketPriceProvider, Sourced, WeatherProvider};
use crate::services::classifier::CropClassifier;
use crate::services::guidance::GuidanceCatalog;
use crate::services::soil::estimate_soil;

/// Relative humidity fed to the classifier; no provider supplies it yet
pub const ASSUMED_HUMIDITY: f64 = 70.0;

/// Which commodity the market lookup is made for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketCommodity {
    /// A configured commodity, looked up concurrently with the weather
    Fixed(String),
    /// The predicted crop, looked up once inference is done
    Predicted,
}

impl MarketCommodity {
    pub fn from_config(source: CommoditySource, commodity: &str) -> Self {
        match source {
            CommoditySource::Fixed => MarketCommodity::Fixed(commodity.to_string()),
            CommoditySource::Predicted => MarketCommodity::Predicted,
        }
    }
}

impl Default for MarketCommodity {
    fn default() -> Self {
        MarketCommodity::Fixed(Crop::Rice.name().to_string())
    }
}

/// Recommendation orchestrator
#[derive(Clone)]
pub struct RecommendationService {
    weather: Arc<dyn WeatherProvider>,
    market: Arc<dyn MarketPriceProvider>,
    classifier: Option<Arc<dyn CropClassifier>>,
    guidance: Arc<GuidanceCatalog>,
    market_commodity: MarketCommodity,
}

impl RecommendationService {
    /// Create a new RecommendationService.
    ///
    /// `classifier` is `None` when the model failed to load; every
    /// recommendation then fails with `AppError::ModelUnavailable`.
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        market: Arc<dyn MarketPriceProvider>,
        classifier: Option<Arc<dyn CropClassifier>>,
        guidance: Arc<GuidanceCatalog>,
    ) -> Self {
        Self {
            weather,
            market,
            classifier,
            guidance,
            market_commodity: MarketCommodity::default(),
        }
    }

    /// Choose which commodity market prices are looked up for
    pub fn with_market_commodity(mut self, market_commodity: MarketCommodity) -> Self {
        self.market_commodity = market_commodity;
        self
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    /// Produce a crop recommendation for a farm
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        let classifier = self.classifier.as_ref().ok_or(AppError::ModelUnavailable)?;
        let coordinates = request.coordinates();

        // Weather and a fixed-commodity market lookup are independent
        let (weather, early_market) = match &self.market_commodity {
            MarketCommodity::Fixed(commodity) => {
                let (weather, market) = tokio::join!(
                    self.weather.fetch_summary(coordinates),
                    self.market
                        .fetch_quote(&request.state, &request.district, commodity)
                );
                (weather, Some(market))
            }
            MarketCommodity::Predicted => (self.weather.fetch_summary(coordinates).await, None),
        };

        if let Sourced::Fallback { reason, .. } = &weather {
            tracing::warn!(reason = %reason, "Recommending with fallback weather");
        }
        let weather = weather.into_inner();

        let soil = estimate_soil(request.latitude).overridden_by(
            request.nitrogen,
            request.phosphorus,
            request.potassium,
            request.ph,
        );

        let features = build_features(&soil, &weather);
        let label = classifier.predict(&features);
        let crop = Crop::from_label(label).ok_or(AppError::UnknownLabel(label))?;
        tracing::info!(crop = %crop, label, "Crop predicted");

        let market = match early_market {
            Some(market) => market,
            None => {
                self.market
                    .fetch_quote(&request.state, &request.district, crop.name())
                    .await
            }
        };
        if let MarketLookup::Unavailable { reason, .. } = &market {
            tracing::debug!(?reason, "No market quote");
        }

        let cultivation_plan = self
            .guidance
            .lookup(crop.name())
            .plan_for(request.farming_method);

        Ok(assemble_response(
            crop,
            &soil,
            weather,
            market.into_market_data(),
            cultivation_plan,
        ))
    }
}

/// Lay soil and weather out in the order the classifier was trained on
pub fn build_features(soil: &SoilEstimate, weather: &WeatherSummary) -> FeatureVector {
    FeatureVector {
        nitrogen: soil.nitrogen as f64,
        phosphorus: soil.phosphorus as f64,
        potassium: soil.potassium as f64,
        temperature: weather.avg_temperature_last_30_days,
        humidity: ASSUMED_HUMIDITY,
        ph: soil.ph,
        rainfall: weather.total_rainfall_last_30_days,
    }
}

fn assemble_response(
    crop: Crop,
    soil: &SoilEstimate,
    weather: WeatherSummary,
    market_data: MarketData,
    cultivation_plan: &str,
) -> RecommendationResponse {
    RecommendationResponse {
        recommended_crop: crop.name().to_string(),
        input_data_summary: InputDataSummary {
            soil_n: soil.nitrogen,
            soil_p: soil.phosphorus,
            soil_k: soil.potassium,
            soil_ph: soil.ph,
        },
        processed_weather_data: ProcessedWeatherData {
            calculated_avg_temperature_last_30d: round_to(weather.avg_temperature_last_30_days, 2),
            calculated_total_rainfall_last_30d: round_to(weather.total_rainfall_last_30_days, 2),
            assumed_humidity: ASSUMED_HUMIDITY,
        },
        market_data,
        cultivation_plan: cultivation_plan.to_string(),
        weather_forecast_7_days: weather.forecast,
        reason: format!(
            "AI model recommends '{}' based on soil conditions and recent weather patterns. \
             Market and forecast data are provided for planning.",
            crop
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order() {
        let soil = SoilEstimate {
            ph: 6.5,
            nitrogen: 90,
            phosphorus: 42,
            potassium: 43,
        };
        let weather = WeatherSummary {
            avg_temperature_last_30_days: 27.3,
            total_rainfall_last_30_days: 202.9,
            forecast: Vec::new(),
        };
        assert_eq!(
            build_features(&soil, &weather).to_array(),
            [90.0, 42.0, 43.0, 27.3, 70.0, 6.5, 202.9]
        );
    }

    #[test]
    fn test_market_commodity_from_config() {
        assert_eq!(
            MarketCommodity::from_config(CommoditySource::Fixed, "Wheat"),
            MarketCommodity::Fixed("Wheat".to_string())
        );
        assert_eq!(
            MarketCommodity::from_config(CommoditySource::Predicted, "Wheat"),
            MarketCommodity::Predicted
        );
    }
}
