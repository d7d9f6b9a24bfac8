//! Service state endpoint: health

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AppState;
use crate::model::ArtifactFingerprint;

// ============================================================================
// Health Endpoint
// ============================================================================

/// Health response: which model build is serving
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" once the server is answering
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Preprocessor kind (e.g. "standard")
    pub preprocessor: &'static str,
    /// Classifier kind (e.g. "gaussian_nb")
    pub classifier: &'static str,
    /// Whether ranked alternatives are available
    pub supports_proba: bool,
    /// Number of crop classes the model knows
    pub classes: usize,
    /// MD5 digests of the artifact files
    pub fingerprint: ArtifactFingerprint,
    /// When the artifacts were loaded
    pub loaded_at: DateTime<Utc>,
}

/// GET /health - artifact and build status
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let pipeline = state.store.pipeline();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        preprocessor: pipeline.preprocessor().kind(),
        classifier: pipeline.classifier().kind(),
        supports_proba: pipeline.classifier().supports_proba(),
        classes: pipeline.encoder().len(),
        fingerprint: state.store.fingerprint().clone(),
        loaded_at: state.store.loaded_at(),
    })
}
