//! Top-N ranking of class probabilities

use serde::{Deserialize, Serialize};

use super::{LabelEncoder, ModelError};
use crate::config::defaults::DEFAULT_TOP_N;
use crate::types::RankedCrop;

/// How the recommendation list is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingOptions {
    /// Number of entries to return
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Drop classes whose probability is exactly zero
    #[serde(default)]
    pub exclude_zero_probability: bool,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            exclude_zero_probability: false,
        }
    }
}

/// Probability as a percentage rounded to 2 decimals.
pub fn round_confidence(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

/// The `top_n` most probable classes, highest first.
///
/// The sort is stable, so equal probabilities keep class-index order. The
/// probability vector must be aligned with the encoder's classes.
pub fn rank_top_n(
    probabilities: &[f64],
    encoder: &LabelEncoder,
    options: &RankingOptions,
) -> Result<Vec<RankedCrop>, ModelError> {
    if probabilities.len() != encoder.len() {
        return Err(ModelError::DimensionMismatch {
            what: "probability vector",
            expected: encoder.len(),
            found: probabilities.len(),
        });
    }

    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    order.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));

    order
        .into_iter()
        .filter(|&i| !(options.exclude_zero_probability && probabilities[i] == 0.0))
        .take(options.top_n)
        .map(|i| {
            Ok(RankedCrop {
                name: encoder.inverse_transform(i)?.to_string(),
                confidence: round_confidence(probabilities[i]),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(["apple", "banana", "coffee", "rice", "maize"]).unwrap()
    }

    #[test]
    fn test_top_three_descending() {
        let probs = [0.05, 0.6, 0.1, 0.2, 0.05];
        let ranked = rank_top_n(&probs, &encoder(), &RankingOptions::default()).unwrap();
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["banana", "rice", "coffee"]);
        assert_eq!(ranked[0].confidence, 60.0);
        assert!(ranked.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn test_ties_keep_class_order() {
        let probs = [0.25, 0.25, 0.0, 0.25, 0.25];
        let ranked = rank_top_n(&probs, &encoder(), &RankingOptions::default()).unwrap();
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["apple", "banana", "rice"]);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_confidence(0.123_456), 12.35);
        assert_eq!(round_confidence(1.0), 100.0);
        assert_eq!(round_confidence(0.0), 0.0);
    }

    #[test]
    fn test_zero_probability_filter() {
        let probs = [0.0, 0.9, 0.0, 0.1, 0.0];
        let keep = rank_top_n(&probs, &encoder(), &RankingOptions::default()).unwrap();
        assert_eq!(keep.len(), 3);
        assert_eq!(keep[2].confidence, 0.0);

        let opts = RankingOptions {
            exclude_zero_probability: true,
            ..RankingOptions::default()
        };
        let drop = rank_top_n(&probs, &encoder(), &opts).unwrap();
        assert_eq!(drop.len(), 2);
    }

    #[test]
    fn test_fewer_classes_than_n() {
        let enc = LabelEncoder::new(["rice", "maize"]).unwrap();
        let ranked = rank_top_n(&[0.3, 0.7], &enc, &RankingOptions::default()).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "maize");
    }

    #[test]
    fn test_misaligned_vector() {
        assert!(rank_top_n(&[1.0], &encoder(), &RankingOptions::default()).is_err());
    }
}
