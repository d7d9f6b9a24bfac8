//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! every endpoint using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port, runs in CI without `#[ignore]`.

use crop_advisor::api::{cors_layer_from, create_app, create_app_with_cors, AppState};
use crop_advisor::model::{ArtifactStore, Classifier, LabelEncoder, Preprocessor, RankingOptions};
use crop_advisor::NUM_FEATURES;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

/// Logistic model over three crops: rainfall drives rice, nitrogen drives
/// maize, and a negative rainfall weight drives chickpea.
fn create_test_state(ranking: RankingOptions) -> AppState {
    let mut coef = vec![vec![0.0; NUM_FEATURES]; 3];
    coef[0][6] = -0.05; // chickpea: dry
    coef[1][0] = 0.05; // maize: nitrogen
    coef[2][6] = 0.05; // rice: wet
    let store = ArtifactStore::from_parts(
        Preprocessor::Identity,
        Classifier::LogisticRegression {
            coef,
            intercept: vec![0.0; 3],
        },
        LabelEncoder::new(["chickpea", "maize", "rice"]).unwrap(),
    )
    .unwrap();
    AppState::new(store, ranking)
}

fn app() -> Router {
    create_app(create_test_state(RankingOptions::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(app: Router, body: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// ============================================================================
// Form page
// ============================================================================

#[tokio::test]
async fn get_root_renders_empty_form() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
    assert!(body.contains("name=\"rainfall\""));
    assert!(!body.contains("resultsSection"));
}

#[tokio::test]
async fn post_root_recommends_and_ranks() {
    let (status, body) = post_form(
        app(),
        "N=10&P=40&K=40&temperature=25&humidity=80&ph=6.5&rainfall=260",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Recommended: Rice"), "body: {body}");
    assert!(body.contains("Top matches"));
    // Metadata merged from the catalog
    assert!(body.contains("Monsoon/Kharif"));
    // Submitted values echoed back
    assert!(body.contains("value=\"260\""));

    let rice = body.find("🌾 Rice").unwrap();
    let maize = body.find("🌽 Maize").unwrap();
    assert!(rice < maize, "ranked list must be descending");
}

#[tokio::test]
async fn post_root_missing_fields_default_to_zero() {
    let (status, body) = post_form(app(), "N=200").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Recommended: Maize"));
    assert!(body.contains("value=\"0\""));
}

#[tokio::test]
async fn post_root_non_numeric_is_error_payload() {
    let (status, body) = post_form(app(), "N=lots&P=40").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("error-box"));
    assert!(body.contains("could not convert N value"));
    assert!(body.contains("value=\"lots\""));
    assert!(!body.contains("Recommended:"));
}

#[tokio::test]
async fn post_root_wrong_content_type_is_error_payload() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"N\": 1}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&body).contains("error-box"));
}

#[tokio::test]
async fn post_root_script_injection_is_escaped() {
    let (_, body) = post_form(app(), "ph=%3Cscript%3Ealert(1)%3C%2Fscript%3E").await;
    assert!(body.contains("&lt;script&gt;"));
    assert!(!body.contains("<script>alert"));
}

#[tokio::test]
async fn zero_probability_switch_trims_ranking() {
    // Saturated softmax: the two losing classes underflow to exactly 0
    let state = create_test_state(RankingOptions {
        top_n: 3,
        exclude_zero_probability: true,
    });
    let (_, body) = post_form(create_app(state), "rainfall=100000").await;
    assert!(body.contains("🌾 Rice"));
    assert!(!body.contains("🌽 Maize"));

    let (_, body) = post_form(app(), "rainfall=100000").await;
    assert!(body.contains("🌽 Maize"));
    assert!(body.contains("0.00%"));
}

// ============================================================================
// JSON lookups
// ============================================================================

#[tokio::test]
async fn crop_info_known_and_unknown() {
    let (status, body) = get(app(), "/crop_info/Rice").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["name"], "Rice");
    assert_eq!(json["season"], "Monsoon/Kharif");

    let (status, body) = get(app(), "/crop_info/dragonfruit").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}");

    // Padded names are not known crops
    let (status, body) = get(app(), "/crop_info/%20rice%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}");
}

#[tokio::test]
async fn get_ranges_has_fixed_schema() {
    let (status, body) = get(app(), "/get_ranges").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 7);
    for key in ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"] {
        let range = &obj[key];
        assert!(range["min"].is_number(), "{key}.min");
        assert!(range["max"].is_number(), "{key}.max");
        assert!(range["optimal"].is_string(), "{key}.optimal");
    }
    assert_eq!(json["K"]["max"], 205.0);

    // Same answer after a prediction has run
    let app = app();
    let _ = post_form(app.clone(), "N=1").await;
    let (_, again) = get(app, "/get_ranges").await;
    assert_eq!(again, body);
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["classifier"], "logistic_regression");
    assert_eq!(json["supports_proba"], true);
    assert_eq!(json["classes"], 3);
    assert!(json["fingerprint"]["classifier"].is_string());
    assert!(json["loaded_at"].is_string());
}

// ============================================================================
// CORS
// ============================================================================

async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/get_ranges")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn cors_is_same_origin_without_configured_origins() {
    let app = create_app_with_cors(
        create_test_state(RankingOptions::default()),
        cors_layer_from(None),
    );
    assert_eq!(allowed_origin(app, "http://localhost:5173").await, None);
}

#[tokio::test]
async fn cors_allows_configured_origins_only() {
    let cors = cors_layer_from(Some("http://localhost:5173, https://farm.example"));
    let app = create_app_with_cors(create_test_state(RankingOptions::default()), cors);

    assert_eq!(
        allowed_origin(app.clone(), "http://localhost:5173").await.as_deref(),
        Some("http://localhost:5173")
    );
    assert_eq!(
        allowed_origin(app.clone(), "https://farm.example").await.as_deref(),
        Some("https://farm.example")
    );
    assert_eq!(allowed_origin(app, "https://elsewhere.example").await, None);
}

// ============================================================================
// Static assets
// ============================================================================

#[tokio::test]
async fn static_assets_are_served() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/static/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/css");

    let (status, _) = get(app(), "/static/script.js").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(app(), "/static/missing.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _) = get(app(), "/api/v1/status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
