//! Rule-based soil estimate used when the farmer has no soil test

use shared::SoilEstimate;

/// Latitude separating the northern and southern soil profiles
pub const NORTHERN_LATITUDE_THRESHOLD: f64 = 25.0;

const NORTHERN_PROFILE: SoilEstimate = SoilEstimate {
    ph: 7.5,
    nitrogen: 40,
    phosphorus: 20,
    potassium: 35,
};

const SOUTHERN_PROFILE: SoilEstimate = SoilEstimate {
    ph: 6.0,
    nitrogen: 70,
    phosphorus: 50,
    potassium: 60,
};

/// Estimate soil nutrients for a latitude.
///
/// Two bands only: alkaline, nutrient-poor soils north of 25°N and more
/// acidic, nutrient-rich soils elsewhere. Low confidence; measured values
/// from the request always take precedence.
pub fn estimate_soil(latitude: f64) -> SoilEstimate {
    if latitude > NORTHERN_LATITUDE_THRESHOLD {
        NORTHERN_PROFILE
    } else {
        SOUTHERN_PROFILE
    }
}
