//! Single-row inference: preprocess -> classify -> decode -> rank

use super::{rank_top_n, Classifier, LabelEncoder, ModelError, Preprocessor, RankingOptions};
use crate::types::{FeatureRow, Prediction};

/// Raw classifier output for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub class_index: usize,
    pub label: String,
    /// Aligned with the label encoder's classes; `None` when the classifier
    /// does not estimate probabilities
    pub probabilities: Option<Vec<f64>>,
}

/// The three model artifacts, checked for mutual consistency.
///
/// Immutable after construction, so one instance can be shared across all
/// requests without locking.
#[derive(Debug, Clone)]
pub struct InferencePipeline {
    preprocessor: Preprocessor,
    classifier: Classifier,
    encoder: LabelEncoder,
}

impl InferencePipeline {
    pub fn new(
        preprocessor: Preprocessor,
        classifier: Classifier,
        encoder: LabelEncoder,
    ) -> Result<Self, ModelError> {
        preprocessor.validate()?;
        classifier.validate()?;
        encoder.validate()?;
        if classifier.n_classes() != encoder.len() {
            return Err(ModelError::ClassCountMismatch {
                classifier: classifier.n_classes(),
                encoder: encoder.len(),
            });
        }
        Ok(Self {
            preprocessor,
            classifier,
            encoder,
        })
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    /// Run the model on one row.
    pub fn infer(&self, row: &FeatureRow) -> Result<Inference, ModelError> {
        let x = self.preprocessor.transform(row)?;
        let probabilities = self.classifier.predict_proba(&x)?;
        let class_index = match &probabilities {
            Some(p) => super::argmax(p).ok_or(ModelError::Degenerate)?,
            None => self.classifier.predict(&x)?,
        };
        let label = self.encoder.inverse_transform(class_index)?.to_string();
        Ok(Inference {
            class_index,
            label,
            probabilities,
        })
    }

    /// Run the model on one row and rank the alternatives.
    pub fn predict(
        &self,
        row: &FeatureRow,
        ranking: &RankingOptions,
    ) -> Result<Prediction, ModelError> {
        let inference = self.infer(row)?;
        let ranked = inference
            .probabilities
            .as_deref()
            .map(|p| rank_top_n(p, &self.encoder, ranking))
            .transpose()?;
        Ok(Prediction {
            crop: inference.label,
            class_index: inference.class_index,
            ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NUM_FEATURES;

    fn logreg_pipeline() -> InferencePipeline {
        let mut coef = vec![vec![0.0; NUM_FEATURES]; 3];
        coef[0][0] = 1.0; // nitrogen
        coef[1][4] = 1.0; // humidity
        coef[2][6] = 1.0; // rainfall
        InferencePipeline::new(
            Preprocessor::Standard {
                mean: vec![50.0, 50.0, 50.0, 25.0, 70.0, 6.5, 100.0],
                scale: vec![30.0, 30.0, 50.0, 5.0, 20.0, 0.8, 50.0],
            },
            Classifier::LogisticRegression {
                coef,
                intercept: vec![0.0; 3],
            },
            LabelEncoder::new(["cotton", "coconut", "rice"]).unwrap(),
        )
        .unwrap()
    }

    fn rainy_row() -> FeatureRow {
        FeatureRow::from_array([50.0, 40.0, 40.0, 25.0, 70.0, 6.5, 260.0])
    }

    #[test]
    fn test_infer_picks_highest_probability() {
        let out = logreg_pipeline().infer(&rainy_row()).unwrap();
        assert_eq!(out.label, "rice");
        assert_eq!(out.class_index, 2);
        let p = out.probabilities.unwrap();
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let pipeline = logreg_pipeline();
        let a = pipeline.predict(&rainy_row(), &RankingOptions::default()).unwrap();
        let b = pipeline.predict(&rainy_row(), &RankingOptions::default()).unwrap();
        assert_eq!(a, b);
        let ranked = a.ranked.unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "rice");
        let total: f64 = ranked.iter().map(|r| r.confidence).sum();
        assert!(total <= 100.0 + 0.01);
    }

    #[test]
    fn test_class_count_mismatch() {
        let err = InferencePipeline::new(
            Preprocessor::Identity,
            Classifier::NearestCentroid {
                centroids: vec![vec![0.0; NUM_FEATURES]; 2],
            },
            LabelEncoder::new(["rice", "maize", "jute"]).unwrap(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::ClassCountMismatch {
                classifier: 2,
                encoder: 3
            }
        );
    }

    #[test]
    fn test_no_ranking_without_probabilities() {
        let pipeline = InferencePipeline::new(
            Preprocessor::Identity,
            Classifier::NearestCentroid {
                centroids: vec![vec![0.0; NUM_FEATURES], vec![100.0; NUM_FEATURES]],
            },
            LabelEncoder::new(["lentil", "banana"]).unwrap(),
        )
        .unwrap();
        let pred = pipeline
            .predict(&FeatureRow::from_array([90.0; NUM_FEATURES]), &RankingOptions::default())
            .unwrap();
        assert_eq!(pred.crop, "banana");
        assert!(pred.ranked.is_none());
    }

    #[test]
    fn test_non_finite_row_errors() {
        let mut row = rainy_row();
        row.ph = f64::INFINITY;
        assert!(matches!(
            logreg_pipeline().infer(&row),
            Err(ModelError::NonFiniteInput { feature: "ph" })
        ));
    }
}
