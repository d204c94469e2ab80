//! Crop recommendation request and response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DailyForecast, MarketData};
use crate::types::{FarmingMethod, GpsCoordinates};

/// Farmer-supplied inputs for a recommendation
///
/// Nutrient and pH fields are optional; a missing or zero value is replaced
/// by the soil estimate for the location.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[serde(rename = "N", default)]
    #[validate(range(min = 0, message = "N must not be negative"))]
    pub nitrogen: Option<i32>,

    #[serde(rename = "P", default)]
    #[validate(range(min = 0, message = "P must not be negative"))]
    pub phosphorus: Option<i32>,

    #[serde(rename = "K", default)]
    #[validate(range(min = 0, message = "K must not be negative"))]
    pub potassium: Option<i32>,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 14.0, message = "ph must be between 0 and 14"))]
    pub ph: Option<f64>,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,

    #[validate(length(min = 1, message = "district is required"))]
    pub district: String,

    #[serde(default)]
    pub farming_method: FarmingMethod,
}

impl RecommendationRequest {
    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude, self.longitude)
    }
}

/// Soil values actually fed to the classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputDataSummary {
    #[serde(rename = "soil_N")]
    pub soil_n: i32,
    #[serde(rename = "soil_P")]
    pub soil_p: i32,
    #[serde(rename = "soil_K")]
    pub soil_k: i32,
    pub soil_ph: f64,
}

/// Weather aggregates fed to the classifier, rounded for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedWeatherData {
    pub calculated_avg_temperature_last_30d: f64,
    pub calculated_total_rainfall_last_30d: f64,
    pub assumed_humidity: f64,
}

/// Full recommendation returned to the farmer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub recommended_crop: String,
    pub input_data_summary: InputDataSummary,
    pub processed_weather_data: ProcessedWeatherData,
    pub market_data: MarketData,
    pub cultivation_plan: String,
    pub weather_forecast_7_days: Vec<DailyForecast>,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"latitude": 30.0, "longitude": 77.0, "state": "Punjab", "district": "Ludhiana"}"#,
        )
        .unwrap();
        assert_eq!(request.nitrogen, None);
        assert_eq!(request.ph, None);
        assert_eq!(request.farming_method, FarmingMethod::Inorganic);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_field_names() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"N": 90, "P": 42, "K": 43, "ph": 6.5, "latitude": 11.0, "longitude": 79.7,
                "state": "Tamil Nadu", "district": "Cuddalore", "farming_method": "organic"}"#,
        )
        .unwrap();
        assert_eq!(request.nitrogen, Some(90));
        assert_eq!(request.phosphorus, Some(42));
        assert_eq!(request.potassium, Some(43));
        assert_eq!(request.farming_method, FarmingMethod::Organic);
    }

    #[test]
    fn test_request_rejects_bad_coordinates() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"latitude": 95.0, "longitude": 200.0, "state": "Punjab", "district": "Ludhiana"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("latitude"));
        assert!(fields.contains_key("longitude"));
    }

    #[test]
    fn test_request_nutrients_only_need_to_be_non_negative() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"N": 2500, "P": 1200, "K": 0, "latitude": 30.0, "longitude": 77.0,
                "state": "Punjab", "district": "Ludhiana"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let request: RecommendationRequest = serde_json::from_str(
            r#"{"N": -1, "latitude": 30.0, "longitude": 77.0,
                "state": "Punjab", "district": "Ludhiana"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nitrogen"));
    }

    #[test]
    fn test_summary_field_names() {
        let summary = InputDataSummary {
            soil_n: 40,
            soil_p: 20,
            soil_k: 35,
            soil_ph: 7.5,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["soil_N"], 40);
        assert_eq!(value["soil_P"], 20);
        assert_eq!(value["soil_K"], 35);
        assert_eq!(value["soil_ph"], 7.5);
    }
}
