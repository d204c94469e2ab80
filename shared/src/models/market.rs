//! Market price models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trend text attached when no price could be found
pub const UNKNOWN_PRICE_TREND: &str = "Price trend cannot be predicted due to missing data.";

/// Current price of a commodity at a market
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketQuote {
    pub commodity: String,
    pub market: String,
    /// Prices in INR per quintal
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub modal_price: Option<Decimal>,
    pub price_trend_forecast: String,
}

/// Returned in place of a quote when no price could be obtained
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnavailableQuote {
    pub info: String,
    pub price_trend_forecast: String,
}

impl UnavailableQuote {
    pub fn new(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            price_trend_forecast: UNKNOWN_PRICE_TREND.to_string(),
        }
    }
}

/// Why a market lookup produced no quote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Provider returned no records for the district
    NoRecords,
    /// Records exist but none for the commodity
    CommodityNotListed,
    /// Provider could not be reached or returned garbage
    ProviderError,
}

/// Market section of a recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MarketData {
    Quote(MarketQuote),
    Unavailable(UnavailableQuote),
}

/// Trend text for a commodity with a live quote
pub fn stable_price_trend(commodity: &str) -> String {
    format!("Prices for {} are predicted to be stable.", commodity)
}
