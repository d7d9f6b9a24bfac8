//! Crop Advisor: soil and climate readings in, ranked crop recommendations out
//!
//! ## Architecture
//!
//! - **Model**: preprocessor, classifier and label encoder artifacts, loaded
//!   once and chained into an inference pipeline with top-N ranking
//! - **Catalog**: static crop metadata and input guidance ranges
//! - **API**: Axum router serving the form page and JSON lookups
//! - **Config**: TOML settings with defaults and validation

pub mod api;
pub mod catalog;
pub mod config;
pub mod model;
pub mod types;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{FeatureRow, FormError, Prediction, RankedCrop, FEATURE_NAMES, NUM_FEATURES};

// Re-export model components
pub use model::{ArtifactStore, InferencePipeline, ModelError, RankingOptions};
