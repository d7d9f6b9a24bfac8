//! API route handlers
//!
//! - Form page rendering and recommendation submission
//! - Crop metadata and input range lookups
//! - Service health

mod lookup;
mod recommend;
mod status;

pub use lookup::*;
pub use recommend::*;
pub use status::*;

use crate::model::{ArtifactStore, ModelError, RankingOptions};
use crate::types::FormError;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers. Cloning is cheap: the pipeline sits
/// behind an `Arc` and is never mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Loaded model artifacts
    pub store: ArtifactStore,
    /// How many alternatives to show and whether zero-probability crops count
    pub ranking: RankingOptions,
}

impl AppState {
    pub fn new(store: ArtifactStore, ranking: RankingOptions) -> Self {
        Self { store, ranking }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Anything that can go wrong between a submitted form and a prediction.
///
/// These are reported inside the rendered page, never as an HTTP error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("could not read form submission: {0}")]
    Request(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("prediction failed: {0}")]
    Model(#[from] ModelError),
}
