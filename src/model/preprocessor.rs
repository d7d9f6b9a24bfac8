//! Feature preprocessing applied before classification

use serde::{Deserialize, Serialize};

use super::ModelError;
use crate::types::{FeatureRow, FEATURE_NAMES, NUM_FEATURES};

/// Deterministic per-feature transform fitted at training time.
///
/// A zero entry in `scale` marks a constant training feature and is treated
/// as 1 so the transform never divides by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preprocessor {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    /// Pass-through
    Identity,
}

impl Preprocessor {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Standard { .. } => "standard",
            Self::MinMax { .. } => "min_max",
            Self::Identity => "identity",
        }
    }

    /// Check parameter shapes and values.
    pub fn validate(&self) -> Result<(), ModelError> {
        let (offset, scale, offset_name) = match self {
            Self::Standard { mean, scale } => (mean, scale, "preprocessor mean"),
            Self::MinMax { min, scale } => (min, scale, "preprocessor min"),
            Self::Identity => return Ok(()),
        };
        check_len(offset_name, offset)?;
        check_len("preprocessor scale", scale)?;
        if offset.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::invalid(
                "preprocessor",
                "parameters must be finite numbers",
            ));
        }
        Ok(())
    }

    /// Transform one row into model space.
    pub fn transform(&self, row: &FeatureRow) -> Result<[f64; NUM_FEATURES], ModelError> {
        let raw = row.to_array();
        if let Some(i) = raw.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteInput {
                feature: FEATURE_NAMES[i],
            });
        }

        let mut out = raw;
        match self {
            Self::Standard { mean, scale } => {
                check_len("preprocessor mean", mean)?;
                check_len("preprocessor scale", scale)?;
                for (i, x) in out.iter_mut().enumerate() {
                    *x = (*x - mean[i]) / effective_scale(scale[i]);
                }
            }
            Self::MinMax { min, scale } => {
                check_len("preprocessor min", min)?;
                check_len("preprocessor scale", scale)?;
                for (i, x) in out.iter_mut().enumerate() {
                    *x = *x * effective_scale(scale[i]) + min[i];
                }
            }
            Self::Identity => {}
        }
        Ok(out)
    }
}

fn effective_scale(s: f64) -> f64 {
    if s == 0.0 {
        1.0
    } else {
        s
    }
}

fn check_len(what: &'static str, values: &[f64]) -> Result<(), ModelError> {
    if values.len() == NUM_FEATURES {
        Ok(())
    } else {
        Err(ModelError::DimensionMismatch {
            what,
            expected: NUM_FEATURES,
            found: values.len(),
        })
    }
}
