//! Class index <-> crop label mapping

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ModelError;

/// Crop labels in class-index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new<S: Into<String>>(classes: impl IntoIterator<Item = S>) -> Result<Self, ModelError> {
        let encoder = Self {
            classes: classes.into_iter().map(Into::into).collect(),
        };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Classes must be non-empty, non-blank and unique.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::invalid("label encoder", "no classes"));
        }
        let mut seen = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if class.trim().is_empty() {
                return Err(ModelError::invalid("label encoder", "blank class label"));
            }
            if !seen.insert(class.as_str()) {
                return Err(ModelError::invalid(
                    "label encoder",
                    format!("duplicate class '{class}'"),
                ));
            }
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Label for a class index.
    pub fn inverse_transform(&self, index: usize) -> Result<&str, ModelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::ClassIndexOutOfRange {
                index,
                classes: self.classes.len(),
            })
    }

    /// Class index for a label (exact match).
    pub fn transform(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }
}
