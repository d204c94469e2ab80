//! Common types used across the service

use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// How the farmer intends to cultivate
///
/// Parsing is lenient: anything other than "organic" (any case) is inorganic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FarmingMethod {
    Organic,
    #[default]
    Inorganic,
}

impl FarmingMethod {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("organic") {
            FarmingMethod::Organic
        } else {
            FarmingMethod::Inorganic
        }
    }
}

impl From<String> for FarmingMethod {
    fn from(value: String) -> Self {
        FarmingMethod::parse(&value)
    }
}

impl std::fmt::Display for FarmingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FarmingMethod::Organic => write!(f, "organic"),
            FarmingMethod::Inorganic => write!(f, "inorganic"),
        }
    }
}
