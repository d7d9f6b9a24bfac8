//! Crop classification model
//!
//! The model is three artifacts trained offline and loaded once at startup:
//! - `preprocessor`: numeric transform applied to the raw feature row
//! - `classifier`: maps a transformed row to a class index and, for most
//!   kinds, a class-probability vector
//! - `label_encoder`: maps class indices back to crop labels
//!
//! `pipeline` chains the three for a single row and `ranker` turns the
//! probability vector into the top-N recommendation list. `artifacts` owns
//! loading, consistency checks and fingerprinting of the artifact files.

pub mod artifacts;
pub mod classifier;
pub mod label_encoder;
pub mod pipeline;
pub mod preprocessor;
pub mod ranker;

pub use artifacts::{ArtifactError, ArtifactFingerprint, ArtifactPaths, ArtifactStore};
pub use classifier::{Classifier, DecisionTree};
pub use label_encoder::LabelEncoder;
pub use pipeline::{Inference, InferencePipeline};
pub use preprocessor::Preprocessor;
pub use ranker::{rank_top_n, round_confidence, RankingOptions};

/// Errors raised while validating or evaluating model artifacts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("{what}: expected {expected} values, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("input {feature} is not a finite number")]
    NonFiniteInput { feature: &'static str },
    #[error("class index {index} is out of range for {classes} classes")]
    ClassIndexOutOfRange { index: usize, classes: usize },
    #[error("classifier has {classifier} classes but label encoder has {encoder}")]
    ClassCountMismatch { classifier: usize, encoder: usize },
    #[error("invalid {what}: {reason}")]
    Invalid { what: &'static str, reason: String },
    #[error("tree {tree} is malformed: {reason}")]
    InvalidTree { tree: usize, reason: String },
    #[error("classifier produced no usable scores")]
    Degenerate,
}

impl ModelError {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            what,
            reason: reason.into(),
        }
    }
}

/// Index of the first maximum, matching `argmax` semantics of the training
/// tooling. `None` for an empty slice.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
