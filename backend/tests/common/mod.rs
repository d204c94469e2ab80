//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use crop_advisor::external::market_price::{select_quote, PriceRecord, PriceRecordsResponse};
use crop_advisor::external::{MarketLookup, MarketPriceProvider, Sourced, WeatherProvider};
use crop_advisor::services::{CropClassifier, GuidanceCatalog, RecommendationService};
use shared::{DailyForecast, FeatureVector, GpsCoordinates, WeatherSummary};
use tower::ServiceExt;

/// Weather provider returning a canned live summary
pub struct StaticWeather(pub WeatherSummary);

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn fetch_summary(&self, _coordinates: GpsCoordinates) -> Sourced<WeatherSummary> {
        Sourced::Live(self.0.clone())
    }
}

/// Seven days of forecast starting on 2025-09-21
pub fn week_forecast() -> Vec<DailyForecast> {
    (0..7)
        .map(|i| DailyForecast {
            date: NaiveDate::from_ymd_opt(2025, 9, 21 + i).unwrap(),
            temp_max: Some(33.0 + i as f64 / 10.0),
            temp_min: Some(24.0),
            rainfall: if i % 2 == 0 { 0.0 } else { 3.4 },
        })
        .collect()
}

pub fn live_weather() -> StaticWeather {
    StaticWeather(WeatherSummary {
        avg_temperature_last_30_days: 32.456,
        total_rainfall_last_30_days: 187.333,
        forecast: week_forecast(),
    })
}

/// Market provider answering from canned price records
pub struct RecordsMarket {
    pub records: Vec<PriceRecord>,
    pub requested: Mutex<Vec<String>>,
}

impl RecordsMarket {
    pub fn from_json(json: &str) -> Self {
        let parsed: PriceRecordsResponse = serde_json::from_str(json).unwrap();
        Self {
            records: parsed.records,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::from_json(r#"{"records": []}"#)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketPriceProvider for RecordsMarket {
    async fn fetch_quote(&self, state: &str, district: &str, commodity: &str) -> MarketLookup {
        self.requested.lock().unwrap().push(commodity.to_string());
        select_quote(&self.records, state, district, commodity)
    }
}

pub const LUDHIANA_RECORDS: &str = r#"{"records": [
    {"State": "Punjab", "District": "Ludhiana", "Market": "Khanna", "Commodity": "Wheat",
     "Min_Price": "2275", "Max_Price": "2300", "Modal_Price": "2290"},
    {"State": "Punjab", "District": "Ludhiana", "Market": "Ludhiana", "Commodity": "Rice",
     "Min_Price": "3000", "Max_Price": "3400", "Modal_Price": "3200"}
]}"#;

/// Classifier that always predicts one label and remembers its input
pub struct FixedClassifier {
    pub label: usize,
    pub seen: Mutex<Option<FeatureVector>>,
}

impl FixedClassifier {
    pub fn new(label: usize) -> Self {
        Self {
            label,
            seen: Mutex::new(None),
        }
    }

    pub fn last_features(&self) -> Option<FeatureVector> {
        *self.seen.lock().unwrap()
    }
}

impl CropClassifier for FixedClassifier {
    fn predict(&self, features: &FeatureVector) -> usize {
        *self.seen.lock().unwrap() = Some(*features);
        self.label
    }
}

pub fn service(
    weather: Arc<dyn WeatherProvider>,
    market: Arc<dyn MarketPriceProvider>,
    classifier: Option<Arc<dyn CropClassifier>>,
) -> RecommendationService {
    RecommendationService::new(
        weather,
        market,
        classifier,
        Arc::new(GuidanceCatalog::builtin()),
    )
}

/// POST a JSON body and return status plus decoded JSON response
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}
