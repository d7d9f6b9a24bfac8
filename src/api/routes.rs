//! API route definitions
//!
//! - / - recommendation form (GET) and submission (POST)
//! - /crop_info/:name - crop display metadata
//! - /get_ranges - input guidance ranges
//! - /health - artifact and build status

use axum::{routing::get, Router};

use super::handlers::{self, AppState};

/// The form page.
pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_page).post(handlers::submit_form))
        .with_state(state)
}

/// JSON lookups and health.
pub fn lookup_routes(state: AppState) -> Router {
    Router::new()
        .route("/crop_info/:name", get(handlers::get_crop_info))
        .route("/get_ranges", get(handlers::get_ranges))
        .route("/health", get(handlers::get_health))
        .with_state(state)
}
