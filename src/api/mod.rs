//! HTTP surface using Axum
//!
//! - `/` form page (GET renders it, POST runs a recommendation)
//! - `/crop_info/:name` and `/get_ranges` JSON lookups
//! - `/health` artifact and build status
//! - `/static/*` page assets served via `rust-embed` (compiled into the binary)

pub mod handlers;
pub mod render;
mod routes;

pub use handlers::{AppState, PredictError};

use axum::extract::Path;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::Embed;
use std::borrow::Cow;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::defaults::{CORS_ORIGINS_ENV, MAX_BODY_BYTES};

/// Page template, stylesheet and script from `static/`.
#[derive(Embed)]
#[folder = "static/"]
struct PageAssets;

/// The page skeleton, if it was embedded.
pub(crate) fn page_template() -> Option<Cow<'static, str>> {
    let file = PageAssets::get("index.html")?;
    match file.data {
        Cow::Borrowed(bytes) => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
        Cow::Owned(bytes) => String::from_utf8(bytes).ok().map(Cow::Owned),
    }
}

/// GET /static/*path - serve an embedded asset.
async fn serve_asset(Path(path): Path<String>) -> Response {
    match PageAssets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// CORS layer from `CROP_ADVISOR_CORS_ORIGINS`, see [`cors_layer_from`].
fn build_cors_layer() -> CorsLayer {
    cors_layer_from(std::env::var(CORS_ORIGINS_ENV).ok().as_deref())
}

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// `origins` is a comma-separated list of allowed origins that lets other
/// front ends call the JSON endpoints. Entries that are not valid header
/// values are skipped.
pub fn cors_layer_from(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match origins {
        Some(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        None => base,
    }
}

/// Create the complete application router, with CORS taken from the
/// environment.
pub fn create_app(state: AppState) -> Router {
    create_app_with_cors(state, build_cors_layer())
}

/// Create the application router with an explicit CORS layer.
pub fn create_app_with_cors(state: AppState, cors: CorsLayer) -> Router {
    routes::page_routes(state.clone())
        .merge(routes::lookup_routes(state))
        .route("/static/*path", axum::routing::get(serve_asset))
        // Middleware
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
