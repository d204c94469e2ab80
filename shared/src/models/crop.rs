//! Crop labels and the classifier feature layout

use serde::{Deserialize, Serialize};

/// Crops the classifier can recommend.
///
/// Declaration order is the label encoding used when the model was trained:
/// label `i` is `Crop::ALL[i]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Crop {
    Rice,
    Maize,
    #[serde(rename = "Pigeon Pea")]
    PigeonPea,
    Cotton,
    Wheat,
    Millet,
    Sorghum,
}

impl Crop {
    /// All crops in label order
    pub const ALL: [Crop; 7] = [
        Crop::Rice,
        Crop::Maize,
        Crop::PigeonPea,
        Crop::Cotton,
        Crop::Wheat,
        Crop::Millet,
        Crop::Sorghum,
    ];

    /// Map a classifier label to a crop
    pub fn from_label(label: usize) -> Option<Crop> {
        Self::ALL.get(label).copied()
    }

    /// Classifier label of this crop
    pub fn label(&self) -> usize {
        *self as usize
    }

    /// Look up a crop by display name, ignoring case
    pub fn from_name(name: &str) -> Option<Crop> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|crop| crop.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Crop::Rice => "Rice",
            Crop::Maize => "Maize",
            Crop::PigeonPea => "Pigeon Pea",
            Crop::Cotton => "Cotton",
            Crop::Wheat => "Wheat",
            Crop::Millet => "Millet",
            Crop::Sorghum => "Sorghum",
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Column names of the feature vector, in the order the model was trained on
pub const FEATURE_NAMES: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Input row for the crop classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    /// Mean daily max temperature, °C
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
    pub ph: f64,
    /// Accumulated rainfall, mm
    pub rainfall: f64,
}

impl FeatureVector {
    /// Values laid out in `FEATURE_NAMES` order
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}
