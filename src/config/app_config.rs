//! Service settings as TOML values
//!
//! Every struct implements `Default`, so an empty or absent file yields a
//! working configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use super::validation;
use crate::model::{ArtifactPaths, RankingOptions};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the model artifacts live
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Recommendation list shaping
    #[serde(default)]
    pub ranking: RankingOptions,
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl AppConfig {
    /// Load configuration using the standard search order:
    /// 1. `$CROP_ADVISOR_CONFIG`
    /// 2. `./crop_advisor.toml`
    /// 3. Built-in defaults
    ///
    /// A file that fails to load is logged and skipped.
    pub fn load() -> (Self, ConfigSource) {
        if let Ok(path) = std::env::var(defaults::CONFIG_PATH_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            "Loaded config from {}",
                            defaults::CONFIG_PATH_ENV
                        );
                        return (config, ConfigSource::File(p));
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config, falling back"
                        );
                    }
                }
            } else {
                warn!(
                    path = %path,
                    "{} points to non-existent file, falling back",
                    defaults::CONFIG_PATH_ENV
                );
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return (config, ConfigSource::File(local));
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        "Failed to load ./{}, using defaults",
                        defaults::LOCAL_CONFIG_FILE
                    );
                }
            }
        }

        info!("No config file found, using built-in defaults");
        (Self::default(), ConfigSource::Defaults)
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged as
    /// warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }
        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject impossible values; log suspicious ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = validation::validate_values(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `CROP_ADVISOR_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::DEFAULT_SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

impl ServerConfig {
    /// Split `addr` into host and port. The host may be a name such as
    /// `localhost`; it is resolved when the listener binds.
    pub fn host_port(&self) -> Option<(&str, u16)> {
        let (host, port) = self.addr.rsplit_once(':')?;
        let port = port.parse().ok()?;
        (!host.is_empty()).then_some((host, port))
    }
}

// ============================================================================
// Artifacts Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding the artifact files
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,

    /// Preprocessor file name, relative to `dir`
    #[serde(default = "default_preprocessor_file")]
    pub preprocessor: String,

    /// Classifier file name, relative to `dir`
    #[serde(default = "default_classifier_file")]
    pub classifier: String,

    /// Label encoder file name, relative to `dir`
    #[serde(default = "default_label_encoder_file")]
    pub label_encoder: String,
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from(defaults::ARTIFACT_DIR)
}
fn default_preprocessor_file() -> String {
    defaults::PREPROCESSOR_FILE.to_string()
}
fn default_classifier_file() -> String {
    defaults::CLASSIFIER_FILE.to_string()
}
fn default_label_encoder_file() -> String {
    defaults::LABEL_ENCODER_FILE.to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            preprocessor: default_preprocessor_file(),
            classifier: default_classifier_file(),
            label_encoder: default_label_encoder_file(),
        }
    }
}

impl ArtifactsConfig {
    /// Resolved artifact file locations.
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            preprocessor: self.dir.join(&self.preprocessor),
            classifier: self.dir.join(&self.classifier),
            label_encoder: self.dir.join(&self.label_encoder),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
