//! Cultivation guidance for recommended crops

use std::collections::HashMap;

use shared::{Crop, FarmingMethod};

/// Organic and inorganic cultivation advice for one crop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceEntry {
    pub organic_plan: &'static str,
    pub inorganic_plan: &'static str,
}

impl GuidanceEntry {
    pub fn plan_for(&self, method: FarmingMethod) -> &'static str {
        match method {
            FarmingMethod::Organic => self.organic_plan,
            FarmingMethod::Inorganic => self.inorganic_plan,
        }
    }
}

/// Pick the plan matching a free-text farming method.
///
/// "organic" in any case selects the organic plan; every other value is
/// treated as inorganic.
pub fn select_plan(entry: &GuidanceEntry, farming_method: &str) -> &'static str {
    entry.plan_for(FarmingMethod::parse(farming_method))
}

/// Hand-authored crop to guidance table, built once at startup
#[derive(Debug, Clone)]
pub struct GuidanceCatalog {
    entries: HashMap<Crop, GuidanceEntry>,
    default_crop: Crop,
}

impl GuidanceCatalog {
    /// The built-in table. Crops without an entry fall back to Rice.
    pub fn builtin() -> Self {
        let entries = HashMap::from([
            (
                Crop::Rice,
                GuidanceEntry {
                    organic_plan: "Organic: Use cow dung compost and bio-fertilizers. Maintain natural water levels. Use neem oil for pests.",
                    inorganic_plan: "Inorganic: Use Urea (N), DAP (P), and Muriate of Potash (K). Apply pesticides as needed. Use modern irrigation techniques.",
                },
            ),
            (
                Crop::Maize,
                GuidanceEntry {
                    organic_plan: "Organic: Plant in well-drained soil with a mix of cow dung manure. Use crop rotation to control pests. Apply compost tea.",
                    inorganic_plan: "Inorganic: Use NPK fertilizers during planting. Apply specific herbicides for weed control. Monitor for corn borer and use pesticides.",
                },
            ),
            (
                Crop::PigeonPea,
                GuidanceEntry {
                    organic_plan: "Organic: Fertilize with compost and plant cover crops. Use natural pest controls like ladybugs. Harvest by hand.",
                    inorganic_plan: "Inorganic: Apply a small amount of NPK at sowing. Use chemical pesticides for pod borer. Harvest with machines for efficiency.",
                },
            ),
            (
                Crop::Wheat,
                GuidanceEntry {
                    organic_plan: "Organic: Use green manure and compost. Control weeds with manual weeding. Use natural fungicides for rust.",
                    inorganic_plan: "Inorganic: Apply urea and DAP. Use broadleaf herbicides. Monitor for fungal diseases and apply chemical fungicides.",
                },
            ),
        ]);

        Self {
            entries,
            default_crop: Crop::Rice,
        }
    }

    /// Guidance for a crop name, or the default entry when the crop is unknown
    /// or has no guidance of its own
    pub fn lookup(&self, crop_name: &str) -> &GuidanceEntry {
        Crop::from_name(crop_name)
            .and_then(|crop| self.entries.get(&crop))
            .unwrap_or_else(|| self.default_entry())
    }

    /// Whether a crop has its own entry
    pub fn contains(&self, crop: Crop) -> bool {
        self.entries.contains_key(&crop)
    }

    fn default_entry(&self) -> &GuidanceEntry {
        // `builtin` always inserts the default crop
        &self.entries[&self.default_crop]
    }
}

impl Default for GuidanceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
