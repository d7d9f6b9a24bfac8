//! Static catalog lookups: crop metadata and input ranges

use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::debug;

use crate::catalog::{self, InputRanges};

/// GET /crop_info/:name - display metadata for a crop label
///
/// Case-insensitive. An unknown label answers `{}` with 200.
pub async fn get_crop_info(Path(name): Path<String>) -> Response {
    match catalog::lookup(&name) {
        Some(info) => Json(info).into_response(),
        None => {
            debug!(crop = %name, "No metadata for crop");
            Json(serde_json::json!({})).into_response()
        }
    }
}

/// GET /get_ranges - min/max/optimal guidance for all seven inputs
pub async fn get_ranges() -> Json<&'static InputRanges> {
    Json(catalog::input_ranges())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_crop_info_case_insensitive() {
        let json = body_json(get_crop_info(Path("MaNgO".to_string())).await).await;
        assert_eq!(json["name"], "Mango");
        assert_eq!(json["tips"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_crop_info_unknown_is_empty_object() {
        let json = body_json(get_crop_info(Path("quinoa".to_string())).await).await;
        assert_eq!(json, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_ranges_has_seven_fields() {
        let Json(ranges) = get_ranges().await;
        let json = serde_json::to_value(ranges).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 7);
        assert_eq!(json["ph"]["optimal"], "6.0-7.5");
    }
}
