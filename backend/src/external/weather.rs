//! Weather API client for fetching daily weather data
//!
//! Integrates with Open-Meteo: the archive API for the trailing history window
//! and the forecast API for the days ahead. No API key is required.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{validate_coordinates, DailyForecast, GpsCoordinates, WeatherSummary};
use thiserror::Error;

use super::{Sourced, WeatherProvider};
use crate::config::WeatherConfig;

const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Reasons a live weather summary could not be built
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(&'static str),

    #[error("Weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather API error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} response: {source}")]
    Parse {
        endpoint: &'static str,
        source: serde_json::Error,
    },

    #[error("{endpoint} response has no daily data: {reason}")]
    MissingDaily {
        endpoint: &'static str,
        reason: String,
    },

    #[error("History contains no temperature readings")]
    NoTemperatureData,
}

/// Open-Meteo response envelope
#[derive(Debug, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub daily: Option<OpenMeteoDaily>,
    /// Set by Open-Meteo together with `error: true`
    #[serde(default)]
    pub reason: Option<String>,
}

/// Daily series, index-aligned on `time`
#[derive(Debug, Deserialize)]
pub struct OpenMeteoDaily {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

/// Open-Meteo weather client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    archive_url: String,
    forecast_url: String,
    history_days: i64,
    forecast_days: u32,
}

impl OpenMeteoClient {
    /// Create a new client sharing the given HTTP client
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            archive_url: config.archive_url.clone(),
            forecast_url: config.forecast_url.clone(),
            history_days: config.history_days,
            forecast_days: config.forecast_days,
        }
    }

    /// Fetch history and forecast and reduce them to a summary
    pub async fn try_fetch_summary(
        &self,
        coordinates: GpsCoordinates,
    ) -> Result<WeatherSummary, WeatherError> {
        validate_coordinates(&coordinates).map_err(WeatherError::InvalidCoordinates)?;
        let (start_date, end_date) = history_window(Utc::now().date_naive(), self.history_days);

        let history = self
            .get_daily(
                "archive",
                &self.archive_url,
                &[
                    ("latitude", coordinates.latitude.to_string()),
                    ("longitude", coordinates.longitude.to_string()),
                    ("start_date", start_date.to_string()),
                    ("end_date", end_date.to_string()),
                    ("daily", DAILY_VARIABLES.to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        let forecast = self
            .get_daily(
                "forecast",
                &self.forecast_url,
                &[
                    ("latitude", coordinates.latitude.to_string()),
                    ("longitude", coordinates.longitude.to_string()),
                    ("daily", DAILY_VARIABLES.to_string()),
                    ("forecast_days", self.forecast_days.to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        summarize(history, forecast, self.forecast_days as usize)
    }

    async fn get_daily(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<OpenMeteoDaily, WeatherError> {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        parse_daily(endpoint, &bytes)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch_summary(&self, coordinates: GpsCoordinates) -> Sourced<WeatherSummary> {
        match self.try_fetch_summary(coordinates).await {
            Ok(summary) => {
                tracing::debug!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    forecast_days = summary.forecast.len(),
                    "Fetched live weather"
                );
                Sourced::Live(summary)
            }
            Err(e) => {
                tracing::warn!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Weather API error, using fallback summary: {}",
                    e
                );
                Sourced::Fallback {
                    value: WeatherSummary::fallback(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Inclusive date range covering the trailing `days` up to `today`
pub fn history_window(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(days), today)
}

/// Decode an Open-Meteo payload and extract its daily block
pub fn parse_daily(endpoint: &'static str, body: &[u8]) -> Result<OpenMeteoDaily, WeatherError> {
    let response: OpenMeteoResponse = serde_json::from_slice(body)
        .map_err(|source| WeatherError::Parse { endpoint, source })?;

    response.daily.ok_or_else(|| WeatherError::MissingDaily {
        endpoint,
        reason: response
            .reason
            .unwrap_or_else(|| "missing `daily` key".to_string()),
    })
}

/// Reduce history and forecast series to a summary.
///
/// Missing precipitation counts as 0 mm. Missing temperatures are skipped
/// when averaging; a history without any temperature is an error.
pub fn summarize(
    history: OpenMeteoDaily,
    forecast: OpenMeteoDaily,
    forecast_days: usize,
) -> Result<WeatherSummary, WeatherError> {
    let temperatures: Vec<f64> = history.temperature_2m_max.iter().flatten().copied().collect();
    if temperatures.is_empty() {
        return Err(WeatherError::NoTemperatureData);
    }
    let avg_temperature = temperatures.iter().sum::<f64>() / temperatures.len() as f64;

    let total_rainfall: f64 = history.precipitation_sum.iter().map(|r| r.unwrap_or(0.0)).sum();

    let forecast = forecast
        .time
        .iter()
        .take(forecast_days)
        .enumerate()
        .map(|(i, date)| DailyForecast {
            date: *date,
            temp_max: forecast.temperature_2m_max.get(i).copied().flatten(),
            temp_min: forecast.temperature_2m_min.get(i).copied().flatten(),
            rainfall: forecast.precipitation_sum.get(i).copied().flatten().unwrap_or(0.0),
        })
        .collect();

    Ok(WeatherSummary {
        avg_temperature_last_30_days: avg_temperature,
        total_rainfall_last_30_days: total_rainfall,
        forecast,
    })
}
