//! Model artifact files: loading, consistency checks, fingerprints, saving
//!
//! Each artifact is a JSON document in the models directory. Loading reads
//! all three, validates them as a set and records an MD5 fingerprint per
//! file so operators can tell which model build is serving.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::{Classifier, InferencePipeline, LabelEncoder, ModelError, Preprocessor};
use crate::config::defaults::{CLASSIFIER_FILE, LABEL_ENCODER_FILE, PREPROCESSOR_FILE};

/// Errors from reading or writing artifact files.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write artifact {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("artifact set is inconsistent: {0}")]
    Inconsistent(#[from] ModelError),
}

/// Locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub preprocessor: PathBuf,
    pub classifier: PathBuf,
    pub label_encoder: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            preprocessor: dir.join(PREPROCESSOR_FILE),
            classifier: dir.join(CLASSIFIER_FILE),
            label_encoder: dir.join(LABEL_ENCODER_FILE),
        }
    }
}

/// MD5 hex digests of the artifact file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactFingerprint {
    pub preprocessor: String,
    pub classifier: String,
    pub label_encoder: String,
}

/// Loaded, validated artifacts, shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pipeline: Arc<InferencePipeline>,
    fingerprint: ArtifactFingerprint,
    loaded_at: DateTime<Utc>,
}

impl ArtifactStore {
    /// Read, parse and cross-check the three artifact files.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let (preprocessor, pre_hash) = read_artifact::<Preprocessor>(&paths.preprocessor)?;
        let (classifier, cls_hash) = read_artifact::<Classifier>(&paths.classifier)?;
        let (encoder, enc_hash) = read_artifact::<LabelEncoder>(&paths.label_encoder)?;

        let pipeline = InferencePipeline::new(preprocessor, classifier, encoder)?;
        let store = Self {
            pipeline: Arc::new(pipeline),
            fingerprint: ArtifactFingerprint {
                preprocessor: pre_hash,
                classifier: cls_hash,
                label_encoder: enc_hash,
            },
            loaded_at: Utc::now(),
        };

        info!(
            preprocessor = store.pipeline.preprocessor().kind(),
            classifier = store.pipeline.classifier().kind(),
            classes = store.pipeline.encoder().len(),
            probabilities = store.pipeline.classifier().supports_proba(),
            "Model artifacts loaded"
        );
        Ok(store)
    }

    /// Build a store from in-memory artifacts. Fingerprints are taken over
    /// the JSON the artifacts would be saved as.
    pub fn from_parts(
        preprocessor: Preprocessor,
        classifier: Classifier,
        encoder: LabelEncoder,
    ) -> Result<Self, ArtifactError> {
        let fingerprint = ArtifactFingerprint {
            preprocessor: digest(&serde_json::to_vec(&preprocessor)?),
            classifier: digest(&serde_json::to_vec(&classifier)?),
            label_encoder: digest(&serde_json::to_vec(&encoder)?),
        };
        Ok(Self {
            pipeline: Arc::new(InferencePipeline::new(preprocessor, classifier, encoder)?),
            fingerprint,
            loaded_at: Utc::now(),
        })
    }

    /// Write all three artifacts. Each file is written to a temp file next
    /// to the target and renamed into place.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<(), ArtifactError> {
        write_artifact(&paths.preprocessor, self.pipeline.preprocessor())?;
        write_artifact(&paths.classifier, self.pipeline.classifier())?;
        write_artifact(&paths.label_encoder, self.pipeline.encoder())?;
        info!(dir = ?paths.classifier.parent(), "Model artifacts saved");
        Ok(())
    }

    /// Write all three artifacts under their default names in `dir`.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<(), ArtifactError> {
        self.save(&ArtifactPaths::in_dir(dir))
    }

    pub fn pipeline(&self) -> &InferencePipeline {
        &self.pipeline
    }

    pub fn fingerprint(&self) -> &ArtifactFingerprint {
        &self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn digest(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<(T, String), ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let hash = digest(&bytes);
    info!(path = %path.display(), md5 = %hash, "Read artifact");
    Ok((value, hash))
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let json = serde_json::to_vec_pretty(value)?;
    let write_err = |source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}
