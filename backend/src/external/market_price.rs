//! Market price client for daily mandi prices
//!
//! Queries the data.gov.in "current daily price of various commodities"
//! dataset filtered by state and district, then searches the returned
//! records for the requested commodity.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{stable_price_trend, title_case, MarketQuote, UnavailableReason};
use std::str::FromStr;
use thiserror::Error;

use super::{MarketLookup, MarketPriceProvider};
use crate::config::MarketConfig;

/// Reasons the price records could not be retrieved
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Failed to connect to the market price API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to connect to the market price API: {status}")]
    Status { status: reqwest::StatusCode },

    #[error("An unexpected error occurred while fetching market price: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Price records API response
#[derive(Debug, Deserialize)]
pub struct PriceRecordsResponse {
    #[serde(default)]
    pub records: Vec<PriceRecord>,
}

/// A single commodity price at a market on a given day
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Commodity", default)]
    pub commodity: Option<String>,
    #[serde(rename = "Market", default)]
    pub market: Option<String>,
    #[serde(rename = "Min_Price", default)]
    pub min_price: Option<PriceValue>,
    #[serde(rename = "Max_Price", default)]
    pub max_price: Option<PriceValue>,
    #[serde(rename = "Modal_Price", default)]
    pub modal_price: Option<PriceValue>,
}

/// Prices arrive as strings or numbers depending on the dataset revision
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            // Shortest round-trip text keeps 2183.7 as 2183.7
            PriceValue::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            PriceValue::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }
}

/// data.gov.in price records client
#[derive(Clone)]
pub struct DataGovMarketClient {
    client: Client,
    resource_url: String,
    api_key: String,
    page_limit: u32,
}

impl DataGovMarketClient {
    /// Create a new client sharing the given HTTP client
    pub fn new(client: Client, config: &MarketConfig) -> Self {
        Self {
            client,
            resource_url: format!(
                "{}/{}",
                config.api_endpoint.trim_end_matches('/'),
                config.resource_id
            ),
            api_key: config.api_key.clone(),
            page_limit: config.page_limit,
        }
    }

    /// Fetch all price records for a district
    pub async fn fetch_records(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Vec<PriceRecord>, MarketError> {
        let limit = self.page_limit.to_string();
        let state = title_case(state);
        let district = title_case(district);

        let response = self
            .client
            .get(&self.resource_url)
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("format", "json"),
                ("filters[State]", state.as_str()),
                ("filters[District]", district.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::Status {
                status: response.status(),
            });
        }

        let bytes = response.bytes().await?;
        let data: PriceRecordsResponse = serde_json::from_slice(&bytes)?;
        Ok(data.records)
    }
}

#[async_trait]
impl MarketPriceProvider for DataGovMarketClient {
    async fn fetch_quote(&self, state: &str, district: &str, commodity: &str) -> MarketLookup {
        match self.fetch_records(state, district).await {
            Ok(records) => {
                tracing::debug!(state, district, records = records.len(), "Fetched market records");
                select_quote(&records, state, district, commodity)
            }
            Err(e) => {
                tracing::warn!(state, district, commodity, "Market price lookup failed: {}", e);
                MarketLookup::unavailable(UnavailableReason::ProviderError, e.to_string())
            }
        }
    }
}

/// Pick the first record whose commodity contains `commodity`, ignoring case.
///
/// Records are searched in provider order; there is no ranking among several
/// matching varieties.
pub fn select_quote(
    records: &[PriceRecord],
    state: &str,
    district: &str,
    commodity: &str,
) -> MarketLookup {
    if records.is_empty() {
        return MarketLookup::unavailable(
            UnavailableReason::NoRecords,
            format!("No market data found for {}, {}.", district, state),
        );
    }

    let needle = commodity.to_lowercase();
    let matched = records.iter().find(|record| {
        record
            .commodity
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&needle)
    });

    match matched {
        Some(record) => MarketLookup::Found(MarketQuote {
            commodity: record.commodity.clone().unwrap_or_default(),
            market: record.market.clone().unwrap_or_default(),
            min_price: record.min_price.as_ref().and_then(PriceValue::to_decimal),
            max_price: record.max_price.as_ref().and_then(PriceValue::to_decimal),
            modal_price: record.modal_price.as_ref().and_then(PriceValue::to_decimal),
            price_trend_forecast: stable_price_trend(commodity),
        }),
        None => MarketLookup::unavailable(
            UnavailableReason::CommodityNotListed,
            format!(
                "Price for '{}' was not available in the {} market today.",
                commodity, district
            ),
        ),
    }
}
