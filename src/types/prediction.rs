//! Prediction outputs

use serde::{Deserialize, Serialize};

/// One entry of the ranked recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCrop {
    /// Crop label as stored in the label encoder
    pub name: String,
    /// Class probability as a percentage, rounded to 2 decimals
    pub confidence: f64,
}

/// Result of running one feature row through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted crop label
    pub crop: String,
    /// Class index the classifier picked
    pub class_index: usize,
    /// Top-N alternatives, present only when the classifier exposes
    /// class probabilities
    pub ranked: Option<Vec<RankedCrop>>,
}

impl Prediction {
    /// Lowercased label, the key used for metadata lookups.
    pub fn lookup_key(&self) -> String {
        self.crop.to_lowercase()
    }
}
