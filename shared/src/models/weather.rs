//! Weather data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average temperature reported when live weather is unavailable (°C)
pub const FALLBACK_AVG_TEMPERATURE: f64 = 25.0;

/// Rainfall total reported when live weather is unavailable (mm)
pub const FALLBACK_TOTAL_RAINFALL: f64 = 50.0;

/// Daily weather forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    /// Precipitation sum in mm, never null
    pub rainfall: f64,
}

/// Rolling weather aggregates for a location plus the upcoming forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub avg_temperature_last_30_days: f64,
    pub total_rainfall_last_30_days: f64,
    pub forecast: Vec<DailyForecast>,
}

impl WeatherSummary {
    /// Fixed summary substituted when live retrieval fails
    pub fn fallback() -> Self {
        Self {
            avg_temperature_last_30_days: FALLBACK_AVG_TEMPERATURE,
            total_rainfall_last_30_days: FALLBACK_TOTAL_RAINFALL,
            forecast: Vec::new(),
        }
    }
}
