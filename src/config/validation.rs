//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value checks.
//!
//! Two-pass parse approach: first parse raw TOML into `toml::Value`, walk the
//! key tree, compare against known field names, and emit warnings with "did
//! you mean?" suggestions. Then proceed with normal serde deserialization.
//! Unknown keys never break a config.

use std::collections::BTreeSet;

use super::defaults::TOP_N_WARNING;
use super::AppConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// The complete set of valid dotted key paths for `AppConfig`.
///
/// Maintained by hand to match the structs in `app_config.rs`.
pub fn known_config_keys() -> BTreeSet<&'static str> {
    [
        // [server]
        "server",
        "server.addr",
        // [artifacts]
        "artifacts",
        "artifacts.dir",
        "artifacts.preprocessor",
        "artifacts.classifier",
        "artifacts.label_encoder",
        // [ranking]
        "ranking",
        "ranking.top_n",
        "ranking.exclude_zero_probability",
    ]
    .into_iter()
    .collect()
}

/// Recursively collect every dotted key path in a TOML value.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Levenshtein edit distance between two strings, by characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within edit distance 3. Ties go to the
/// alphabetically first key.
pub fn suggest_correction(unknown: &str, known: &BTreeSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((k, dist)),
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Returns nothing for unparsable input; serde reports that later.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Value Validation
// ============================================================================

/// Check values on a parsed config.
///
/// Returns (errors, warnings). Errors are values the service cannot run
/// with; warnings are legal but unusual.
pub fn validate_values(config: &AppConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.server.host_port().is_none() {
        errors.push(format!(
            "server.addr = '{}' must be host:port with a port in 0-65535",
            config.server.addr
        ));
    }

    let a = &config.artifacts;
    for (key, name) in [
        ("artifacts.preprocessor", &a.preprocessor),
        ("artifacts.classifier", &a.classifier),
        ("artifacts.label_encoder", &a.label_encoder),
    ] {
        if name.trim().is_empty() {
            errors.push(format!("{key} must not be empty"));
        }
    }
    if a.preprocessor == a.classifier
        || a.preprocessor == a.label_encoder
        || a.classifier == a.label_encoder
    {
        errors.push("artifacts: the three artifact file names must differ".to_string());
    }

    let top_n = config.ranking.top_n;
    if top_n == 0 {
        errors.push("ranking.top_n must be at least 1".to_string());
    } else if top_n > TOP_N_WARNING {
        warnings.push(ValidationWarning {
            field: "ranking.top_n".to_string(),
            message: format!("ranking.top_n = {top_n} is larger than usual (1-{TOP_N_WARNING})"),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
