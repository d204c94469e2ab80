//! Soil nutrient models

use serde::{Deserialize, Serialize};

/// Soil nutrient levels and pH for a location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilEstimate {
    pub ph: f64,
    #[serde(rename = "N")]
    pub nitrogen: i32,
    #[serde(rename = "P")]
    pub phosphorus: i32,
    #[serde(rename = "K")]
    pub potassium: i32,
}

impl SoilEstimate {
    /// Merge caller-measured values over this estimate.
    ///
    /// A measured value wins unless it is missing or zero.
    pub fn overridden_by(
        &self,
        nitrogen: Option<i32>,
        phosphorus: Option<i32>,
        potassium: Option<i32>,
        ph: Option<f64>,
    ) -> SoilEstimate {
        SoilEstimate {
            ph: ph.filter(|v| *v != 0.0).unwrap_or(self.ph),
            nitrogen: nitrogen.filter(|v| *v != 0).unwrap_or(self.nitrogen),
            phosphorus: phosphorus.filter(|v| *v != 0).unwrap_or(self.phosphorus),
            potassium: potassium.filter(|v| *v != 0).unwrap_or(self.potassium),
        }
    }
}
