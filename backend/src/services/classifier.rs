//! Crop classifier backed by a serialized decision forest
//!
//! The forest is trained offline and exported as JSON together with a schema
//! tag recording the feature order and class labels it was trained with.
//! Loading rejects any artifact whose tag disagrees with the serving-side
//! column order or label encoding.

use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use shared::{Crop, FeatureVector, FEATURE_NAMES};
use thiserror::Error;

/// Artifact format versions this build can read
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Anything that maps a feature vector to a crop label
pub trait CropClassifier: Send + Sync {
    /// Predicted label, an index into `Crop::ALL`
    fn predict(&self, features: &FeatureVector) -> usize;
}

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported model schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Model feature order {found:?} does not match serving order {expected:?}")]
    FeatureMismatch {
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error("Model class label {0} has no crop name")]
    UnknownClass(usize),

    #[error("Model has no classes")]
    NoClasses,

    #[error("Model has no trees")]
    NoTrees,

    #[error("Tree {tree}: {message}")]
    InvalidTree { tree: usize, message: String },
}

/// Schema tag embedded in the artifact
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSchema {
    pub version: u32,
    pub features: Vec<String>,
}

/// One node of a fitted decision tree
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Go left when `x[feature] <= threshold`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class sample counts or probabilities, indexed like `classes`
    Leaf { distribution: Vec<f64> },
}

/// A fitted decision tree; node 0 is the root
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn leaf_for(&self, x: &[f64; 7]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { distribution } => return distribution,
            }
        }
    }

    /// Children must come after their parent, which rules out cycles
    fn validate(&self, class_count: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_NAMES.len() {
                        return Err(format!("node {} splits on unknown feature {}", i, feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", i));
                    }
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                TreeNode::Leaf { distribution } => {
                    if distribution.len() != class_count {
                        return Err(format!(
                            "leaf {} has {} class weights, expected {}",
                            i,
                            distribution.len(),
                            class_count
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Serialized model as written by the training job
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub schema: ModelSchema,
    /// Crop label of each distribution slot
    pub classes: Vec<usize>,
    pub trees: Vec<DecisionTree>,
}

/// Validated decision forest
#[derive(Debug, Clone)]
pub struct RandomForest {
    classes: Vec<usize>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Validate an artifact against the serving-side feature and label layout
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelLoadError> {
        if artifact.schema.version != SUPPORTED_SCHEMA_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                found: artifact.schema.version,
                expected: SUPPORTED_SCHEMA_VERSION,
            });
        }

        if artifact.schema.features != FEATURE_NAMES {
            return Err(ModelLoadError::FeatureMismatch {
                found: artifact.schema.features,
                expected: FEATURE_NAMES.iter().map(|f| f.to_string()).collect(),
            });
        }

        if artifact.classes.is_empty() {
            return Err(ModelLoadError::NoClasses);
        }
        if let Some(label) = artifact
            .classes
            .iter()
            .copied()
            .find(|label| Crop::from_label(*label).is_none())
        {
            return Err(ModelLoadError::UnknownClass(label));
        }

        if artifact.trees.is_empty() {
            return Err(ModelLoadError::NoTrees);
        }
        for (tree, decision_tree) in artifact.trees.iter().enumerate() {
            decision_tree
                .validate(artifact.classes.len())
                .map_err(|message| ModelLoadError::InvalidTree { tree, message })?;
        }

        Ok(Self {
            classes: artifact.classes,
            trees: artifact.trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Class probabilities averaged over all trees, indexed like `classes`
    pub fn predict_proba(&self, features: &FeatureVector) -> Vec<f64> {
        let x = features.to_array();
        let mut totals = vec![0.0; self.classes.len()];

        for tree in &self.trees {
            let leaf = tree.leaf_for(&x);
            let weight: f64 = leaf.iter().sum();
            if weight <= 0.0 {
                continue;
            }
            for (total, value) in totals.iter_mut().zip(leaf) {
                *total += value / weight;
            }
        }

        let trees = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= trees);
        totals
    }
}

impl CropClassifier for RandomForest {
    fn predict(&self, features: &FeatureVector) -> usize {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

/// A forest loaded from disk along with its provenance
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub forest: RandomForest,
    /// Hex SHA-256 of the artifact bytes
    pub fingerprint: String,
}

impl LoadedModel {
    /// Read, parse and validate a model artifact
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        let forest = RandomForest::from_artifact(artifact)?;
        let fingerprint = hex::encode(Sha256::digest(bytes));
        Ok(Self {
            forest,
            fingerprint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUMP: &str = r#"{
        "schema": {"version": 1, "features": ["N","P","K","temperature","humidity","ph","rainfall"]},
        "classes": [0, 4],
        "trees": [
            {"nodes": [
                {"split": {"feature": 3, "threshold": 24.0, "left": 1, "right": 2}},
                {"leaf": {"distribution": [2.0, 8.0]}},
                {"leaf": {"distribution": [9.0, 1.0]}}
            ]},
            {"nodes": [
                {"split": {"feature": 6, "threshold": 100.0, "left": 1, "right": 2}},
                {"leaf": {"distribution": [0.3, 0.7]}},
                {"leaf": {"distribution": [1.0, 0.0]}}
            ]}
        ]
    }"#;

    fn features(temperature: f64, rainfall: f64) -> FeatureVector {
        FeatureVector {
            nitrogen: 40.0,
            phosphorus: 20.0,
            potassium: 35.0,
            temperature,
            humidity: 70.0,
            ph: 7.5,
            rainfall,
        }
    }

    #[test]
    fn test_forest_votes() {
        let model = LoadedModel::from_bytes(STUMP.as_bytes()).unwrap();
        assert_eq!(model.forest.tree_count(), 2);
        assert_eq!(model.fingerprint.len(), 64);

        // Cool and dry: both trees lean towards wheat (label 4)
        assert_eq!(model.forest.predict(&features(20.0, 50.0)), 4);
        // Hot and wet: both trees say rice (label 0)
        assert_eq!(model.forest.predict(&features(30.0, 150.0)), 0);

        let proba = model.forest.predict_proba(&features(20.0, 50.0));
        assert!((proba[0] - 0.25).abs() < 1e-9);
        assert!((proba[1] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_feature_reordering() {
        let swapped = STUMP.replace(r#""humidity","ph""#, r#""ph","humidity""#);
        assert!(matches!(
            LoadedModel::from_bytes(swapped.as_bytes()),
            Err(ModelLoadError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_class() {
        let bad = STUMP.replace(r#""classes": [0, 4]"#, r#""classes": [0, 12]"#);
        assert!(matches!(
            LoadedModel::from_bytes(bad.as_bytes()),
            Err(ModelLoadError::UnknownClass(12))
        ));
    }

    #[test]
    fn test_rejects_cyclic_tree() {
        let bad = STUMP.replace(r#""left": 1, "right": 2}"#, r#""left": 0, "right": 2}"#);
        assert!(matches!(
            LoadedModel::from_bytes(bad.as_bytes()),
            Err(ModelLoadError::InvalidTree { tree: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let bad = STUMP.replace(r#""version": 1"#, r#""version": 2"#);
        assert!(matches!(
            LoadedModel::from_bytes(bad.as_bytes()),
            Err(ModelLoadError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_bundled_model_loads() {
        let bytes = include_bytes!("../../../models/crop_model.json");
        let model = LoadedModel::from_bytes(bytes).unwrap();
        assert_eq!(model.forest.tree_count(), 3);
        // Northern soil estimate, hot and wet
        assert_eq!(model.forest.predict(&features(32.5, 187.0)), 0);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            LoadedModel::load("/nonexistent/crop_model.json"),
            Err(ModelLoadError::Io(_))
        ));
    }
}
