//! System-wide default constants.

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5000";

/// Environment variable overriding the bind address.
pub const SERVER_ADDR_ENV: &str = "CROP_ADVISOR_ADDR";

/// Environment variable naming a config file.
pub const CONFIG_PATH_ENV: &str = "CROP_ADVISOR_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "crop_advisor.toml";

/// Comma-separated list of allowed CORS origins. Unset means same-origin only.
pub const CORS_ORIGINS_ENV: &str = "CROP_ADVISOR_CORS_ORIGINS";

/// Largest accepted request body (bytes).
pub const MAX_BODY_BYTES: usize = 16 * 1024;

// ============================================================================
// Model Artifacts
// ============================================================================

/// Directory holding the artifact files.
pub const ARTIFACT_DIR: &str = "models";

/// Preprocessor (scaler) artifact file name.
pub const PREPROCESSOR_FILE: &str = "scaler.json";

/// Classifier artifact file name.
pub const CLASSIFIER_FILE: &str = "crop_model.json";

/// Label encoder artifact file name.
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

// ============================================================================
// Ranking
// ============================================================================

/// Number of ranked alternatives shown with a prediction.
pub const DEFAULT_TOP_N: usize = 3;

/// `ranking.top_n` above this value produces a config warning.
pub const TOP_N_WARNING: usize = 10;
