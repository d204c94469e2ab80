//! External API integrations
//!
//! Providers never fail a recommendation: every lookup resolves to a value,
//! tagged with whether it came from the live upstream or a degraded default.

use async_trait::async_trait;
use shared::{
    GpsCoordinates, MarketData, MarketQuote, UnavailableQuote, UnavailableReason, WeatherSummary,
};

pub mod market_price;
pub mod weather;

pub use market_price::DataGovMarketClient;
pub use weather::OpenMeteoClient;

/// Value obtained from an upstream provider
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    /// Fresh data from the provider
    Live(T),
    /// Default substituted because the provider failed
    Fallback { value: T, reason: String },
}

impl<T> Sourced<T> {
    pub fn is_live(&self) -> bool {
        matches!(self, Sourced::Live(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Sourced::Live(value) => value,
            Sourced::Fallback { value, .. } => value,
        }
    }
}

/// Outcome of a market price lookup
#[derive(Debug, Clone, PartialEq)]
pub enum MarketLookup {
    Found(MarketQuote),
    Unavailable {
        reason: UnavailableReason,
        quote: UnavailableQuote,
    },
}

impl MarketLookup {
    pub fn unavailable(reason: UnavailableReason, info: impl Into<String>) -> Self {
        MarketLookup::Unavailable {
            reason,
            quote: UnavailableQuote::new(info),
        }
    }

    pub fn into_market_data(self) -> MarketData {
        match self {
            MarketLookup::Found(quote) => MarketData::Quote(quote),
            MarketLookup::Unavailable { quote, .. } => MarketData::Unavailable(quote),
        }
    }
}

/// Source of daily weather history and forecasts
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_summary(&self, coordinates: GpsCoordinates) -> Sourced<WeatherSummary>;
}

/// Source of commodity prices at local markets
#[async_trait]
pub trait MarketPriceProvider: Send + Sync {
    async fn fetch_quote(&self, state: &str, district: &str, commodity: &str) -> MarketLookup;
}
