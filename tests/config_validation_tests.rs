//! Config Validation Tests
//!
//! Typo detection for unknown keys and value checks, exercised through the
//! public config API independently from the server.

use crop_advisor::config::validation::{
    known_config_keys, suggest_correction, validate_unknown_keys, validate_values,
};
use crop_advisor::config::{AppConfig, ConfigError};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_ranking_section_warns_with_suggestion() {
    let toml_str = r#"
[ranking]
topn = 5
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("topn"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("ranking.top_n"));
    assert!(warnings[0].to_string().contains("did you mean 'ranking.top_n'"));
}

#[test]
fn typo_in_section_name_warns() {
    let toml_str = r#"
[artefacts]
dir = "models"
"#;
    let warnings = validate_unknown_keys(toml_str);
    // Both the table and its key are unknown
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].field, "artefacts");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("artifacts"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[server]
addr = "127.0.0.1:8000"

[artifacts]
dir = "/srv/models"
preprocessor = "scaler.json"
classifier = "forest.json"
label_encoder = "labels.json"

[ranking]
top_n = 5
exclude_zero_probability = true
"#;
    assert!(validate_unknown_keys(toml_str).is_empty());
    let config = AppConfig::from_toml_str(toml_str).unwrap();
    assert!(config.ranking.exclude_zero_probability);
    assert_eq!(config.server.host_port().map(|(_, port)| port), Some(8000));
}

#[test]
fn unknown_keys_do_not_break_loading() {
    let config = AppConfig::from_toml_str(
        r#"
[server]
adr = "127.0.0.1:9000"
"#,
    )
    .unwrap();
    // Typo ignored, default kept
    assert_eq!(config.server.addr, "0.0.0.0:5000");
}

#[test]
fn unparsable_toml_yields_no_key_warnings() {
    assert!(validate_unknown_keys("[ranking\ntop_n = ").is_empty());
}

#[test]
fn every_known_key_suggests_itself() {
    let known = known_config_keys();
    for key in &known {
        assert_eq!(suggest_correction(key, &known).as_deref(), Some(*key));
    }
}

// ============================================================================
// Value Validation
// ============================================================================

#[test]
fn default_config_is_valid() {
    let (errors, warnings) = validate_values(&AppConfig::default());
    assert!(errors.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn impossible_values_are_errors() {
    let err = AppConfig::from_toml_str(
        r#"
[server]
addr = "not-an-address"

[artifacts]
classifier = ""

[ranking]
top_n = 0
"#,
    )
    .unwrap_err();

    let ConfigError::Validation(errors) = err else {
        panic!("expected validation error, got {err}");
    };
    assert!(errors.iter().any(|e| e.contains("server.addr")));
    assert!(errors.iter().any(|e| e.contains("artifacts.classifier")));
    assert!(errors.iter().any(|e| e.contains("top_n")));
}

#[test]
fn large_top_n_only_warns() {
    let config = AppConfig::from_toml_str("[ranking]\ntop_n = 22\n").unwrap();
    let (errors, warnings) = validate_values(&config);
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "ranking.top_n");
}

#[test]
fn wrong_value_type_is_parse_error() {
    assert!(matches!(
        AppConfig::from_toml_str("[ranking]\ntop_n = \"three\"\n"),
        Err(ConfigError::Parse(..))
    ));
}
