//! Classifier kinds and single-row inference
//!
//! All kinds operate on the transformed feature vector. Every kind except
//! `NearestCentroid` exposes class probabilities; for those kinds the
//! predicted class is the first argmax of the probability vector.
//!
//! Gaussian naive Bayes withholds probabilities for a row so far from every
//! class that all joint log-likelihoods underflow to `-inf`. Its prediction
//! then falls back to the first argmax of the joint log-likelihoods.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};

use super::{argmax, ModelError};
use crate::types::NUM_FEATURES;

/// Trained classifier parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    /// Multinomial logistic regression. A single coefficient row is the
    /// binary form: it scores the positive (second) class.
    LogisticRegression {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    /// Gaussian naive Bayes with per-class feature means and variances.
    /// Yields no probabilities when every joint log-likelihood is `-inf`.
    GaussianNb {
        theta: Vec<Vec<f64>>,
        var: Vec<Vec<f64>>,
        class_prior: Vec<f64>,
    },
    /// Ensemble of decision trees, probabilities averaged across trees.
    RandomForest { trees: Vec<DecisionTree> },
    /// Nearest class centroid (Euclidean). No probability estimates.
    NearestCentroid { centroids: Vec<Vec<f64>> },
}

/// Flat-array decision tree.
///
/// Node `i` is a leaf when `children_left[i] < 0`. Internal nodes route left
/// when `x[feature[i]] <= threshold[i]`. `value[i]` holds the per-class
/// sample weights at the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::GaussianNb { .. } => "gaussian_nb",
            Self::RandomForest { .. } => "random_forest",
            Self::NearestCentroid { .. } => "nearest_centroid",
        }
    }

    /// Whether `predict_proba` yields a probability vector.
    pub fn supports_proba(&self) -> bool {
        !matches!(self, Self::NearestCentroid { .. })
    }

    /// Number of classes the classifier distinguishes.
    pub fn n_classes(&self) -> usize {
        match self {
            Self::LogisticRegression { coef, .. } if coef.len() == 1 => 2,
            Self::LogisticRegression { coef, .. } => coef.len(),
            Self::GaussianNb { theta, .. } => theta.len(),
            Self::RandomForest { trees } => trees
                .first()
                .and_then(|t| t.value.first())
                .map_or(0, Vec::len),
            Self::NearestCentroid { centroids } => centroids.len(),
        }
    }

    /// Check parameter shapes and values.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::LogisticRegression { coef, intercept } => {
                if coef.is_empty() {
                    return Err(ModelError::invalid("logistic regression", "no coefficient rows"));
                }
                check_rows("logistic regression coef", coef)?;
                if intercept.len() != coef.len() {
                    return Err(ModelError::DimensionMismatch {
                        what: "logistic regression intercept",
                        expected: coef.len(),
                        found: intercept.len(),
                    });
                }
                check_finite("logistic regression", coef.iter().flatten().chain(intercept))
            }
            Self::GaussianNb {
                theta,
                var,
                class_prior,
            } => {
                if theta.len() < 2 {
                    return Err(ModelError::invalid("gaussian nb", "needs at least 2 classes"));
                }
                check_rows("gaussian nb theta", theta)?;
                check_rows("gaussian nb var", var)?;
                if var.len() != theta.len() || class_prior.len() != theta.len() {
                    return Err(ModelError::DimensionMismatch {
                        what: "gaussian nb class parameters",
                        expected: theta.len(),
                        found: var.len().min(class_prior.len()),
                    });
                }
                check_finite("gaussian nb", theta.iter().flatten())?;
                if var.iter().flatten().any(|v| !(v.is_finite() && *v > 0.0)) {
                    return Err(ModelError::invalid("gaussian nb", "variances must be positive"));
                }
                if class_prior.iter().any(|p| !(p.is_finite() && *p >= 0.0))
                    || class_prior.iter().sum::<f64>() <= 0.0
                {
                    return Err(ModelError::invalid(
                        "gaussian nb",
                        "class priors must be non-negative with a positive sum",
                    ));
                }
                Ok(())
            }
            Self::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ModelError::invalid("random forest", "no trees"));
                }
                let n_classes = self.n_classes();
                if n_classes < 2 {
                    return Err(ModelError::invalid("random forest", "needs at least 2 classes"));
                }
                trees
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, t)| t.validate(i, n_classes))
            }
            Self::NearestCentroid { centroids } => {
                if centroids.is_empty() {
                    return Err(ModelError::invalid("nearest centroid", "no centroids"));
                }
                check_rows("nearest centroid", centroids)?;
                check_finite("nearest centroid", centroids.iter().flatten())
            }
        }
    }

    /// Class probabilities for one transformed row, or `None` when this kind
    /// does not estimate probabilities.
    pub fn predict_proba(&self, x: &[f64; NUM_FEATURES]) -> Result<Option<Vec<f64>>, ModelError> {
        match self {
            Self::LogisticRegression { coef, intercept } => {
                if coef.len() == 1 {
                    let p = sigmoid(dot(&coef[0], x) + intercept[0]);
                    return Ok(Some(vec![1.0 - p, p]));
                }
                let scores: Vec<f64> = coef
                    .iter()
                    .zip(intercept)
                    .map(|(w, b)| dot(w, x) + b)
                    .collect();
                softmax(&scores).map(Some)
            }
            Self::GaussianNb { .. } => {
                let joint = self.joint_log_likelihood(x)?;
                if joint.iter().all(|ll| !ll.is_finite()) {
                    return Ok(None);
                }
                softmax(&joint).map(Some)
            }
            Self::RandomForest { trees } => {
                let n_classes = self.n_classes();
                let mut total = vec![0.0; n_classes];
                for (i, tree) in trees.iter().enumerate() {
                    let leaf = tree.leaf_distribution(i, x)?;
                    for (acc, p) in total.iter_mut().zip(leaf) {
                        *acc += p;
                    }
                }
                let n = trees.len() as f64;
                Ok(Some(total.into_iter().map(|p| p / n).collect()))
            }
            Self::NearestCentroid { .. } => Ok(None),
        }
    }

    /// Predicted class index for one transformed row.
    pub fn predict(&self, x: &[f64; NUM_FEATURES]) -> Result<usize, ModelError> {
        let scores = match self {
            Self::NearestCentroid { centroids } => centroids
                .iter()
                .map(|c| -squared_distance(c, x))
                .collect(),
            Self::GaussianNb { .. } => self.joint_log_likelihood(x)?,
            _ => self.predict_proba(x)?.ok_or(ModelError::Degenerate)?,
        };
        argmax(&scores).ok_or(ModelError::Degenerate)
    }

    /// Per-class `ln P(c) + sum ln N(x_i; mean, var)` for Gaussian naive Bayes.
    fn joint_log_likelihood(&self, x: &[f64; NUM_FEATURES]) -> Result<Vec<f64>, ModelError> {
        let Self::GaussianNb {
            theta,
            var,
            class_prior,
        } = self
        else {
            return Err(ModelError::invalid(self.kind(), "not a gaussian nb"));
        };
        let mut joint = Vec::with_capacity(theta.len());
        for ((means, vars), prior) in theta.iter().zip(var).zip(class_prior) {
            let mut ll = prior.ln();
            for ((&xi, &mean), &v) in x.iter().zip(means).zip(vars) {
                let normal = Normal::new(mean, v.sqrt())
                    .map_err(|e| ModelError::invalid("gaussian nb", e.to_string()))?;
                ll += normal.ln_pdf(xi);
            }
            joint.push(ll);
        }
        Ok(joint)
    }
}

impl DecisionTree {
    fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, tree: usize, n_classes: usize) -> Result<(), ModelError> {
        let n = self.n_nodes();
        let bad = |reason: String| ModelError::InvalidTree { tree, reason };
        if n == 0 {
            return Err(bad("no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(bad("node arrays differ in length".to_string()));
        }
        for node in 0..n {
            if self.value[node].len() != n_classes {
                return Err(bad(format!(
                    "node {node} has {} class values, expected {n_classes}",
                    self.value[node].len()
                )));
            }
            let left = self.children_left[node];
            if left < 0 {
                let weight: f64 = self.value[node].iter().sum();
                if !(weight.is_finite() && weight > 0.0) {
                    return Err(bad(format!("leaf {node} has no positive class weight")));
                }
                continue;
            }
            let right = self.children_right[node];
            let in_range = |c: i64| usize::try_from(c).is_ok_and(|c| c < n && c != node);
            if !in_range(left) || !in_range(right) {
                return Err(bad(format!("node {node} points outside the tree")));
            }
            if !usize::try_from(self.feature[node]).is_ok_and(|f| f < NUM_FEATURES) {
                return Err(bad(format!("node {node} splits on unknown feature")));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf `x` falls into.
    fn leaf_distribution(
        &self,
        tree: usize,
        x: &[f64; NUM_FEATURES],
    ) -> Result<Vec<f64>, ModelError> {
        let mut node = 0usize;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=self.n_nodes() {
            let left = *self.children_left.get(node).ok_or_else(|| ModelError::InvalidTree {
                tree,
                reason: format!("node {node} does not exist"),
            })?;
            if left < 0 {
                let value = &self.value[node];
                let weight: f64 = value.iter().sum();
                return Ok(value.iter().map(|v| v / weight).collect());
            }
            let feature = usize::try_from(self.feature[node]).unwrap_or(usize::MAX);
            let xi = *x.get(feature).ok_or_else(|| ModelError::InvalidTree {
                tree,
                reason: format!("node {node} splits on unknown feature"),
            })?;
            let next = if xi <= self.threshold[node] {
                left
            } else {
                self.children_right[node]
            };
            node = usize::try_from(next).unwrap_or(usize::MAX);
        }
        Err(ModelError::InvalidTree {
            tree,
            reason: "traversal did not reach a leaf".to_string(),
        })
    }
}

fn check_rows(what: &'static str, rows: &[Vec<f64>]) -> Result<(), ModelError> {
    match rows.iter().find(|r| r.len() != NUM_FEATURES) {
        Some(r) => Err(ModelError::DimensionMismatch {
            what,
            expected: NUM_FEATURES,
            found: r.len(),
        }),
        None => Ok(()),
    }
}

fn check_finite<'a>(
    what: &'static str,
    mut values: impl Iterator<Item = &'a f64>,
) -> Result<(), ModelError> {
    if values.all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ModelError::invalid(what, "parameters must be finite numbers"))
    }
}

fn dot(w: &[f64], x: &[f64]) -> f64 {
    w.iter().zip(x).map(|(a, b)| a * b).sum()
}

fn squared_distance(c: &[f64], x: &[f64]) -> f64 {
    c.iter().zip(x).map(|(a, b)| (a - b).powi(2)).sum()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Numerically stable softmax (shift by max, log-sum-exp).
fn softmax(scores: &[f64]) -> Result<Vec<f64>, ModelError> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(ModelError::Degenerate);
    }
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum).collect())
}
