//! Pipeline configuration.
//!
//! A small JSON document naming the working directory and the four artifact
//! files. Every field has a default, so an empty object `{}` is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "metashift.json";

/// Locations of the pipeline artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory the artifact names are resolved against.
    pub work_dir: PathBuf,
    /// Plaintext input.
    pub raw_file: String,
    /// Ciphertext output.
    pub encrypted_file: String,
    /// Metadata output.
    pub metadata_file: String,
    /// Recovered plaintext output.
    pub decrypted_file: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            work_dir: PathBuf::from("."),
            raw_file: "raw_text.txt".to_string(),
            encrypted_file: "encrypted_text.txt".to_string(),
            metadata_file: "encrypted_text.meta".to_string(),
            decrypted_file: "decrypted_text.txt".to_string(),
        }
    }
}

/// Resolved artifact paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Plaintext input.
    pub raw: PathBuf,
    /// Ciphertext output.
    pub encrypted: PathBuf,
    /// Metadata output.
    pub metadata: PathBuf,
    /// Recovered plaintext output.
    pub decrypted: PathBuf,
}

impl PipelineConfig {
    /// Creates a default configuration rooted at `work_dir`.
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            work_dir: work_dir.into(),
            ..Default::default()
        }
    }

    /// Joins each artifact name onto `work_dir`.
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            raw: self.work_dir.join(&self.raw_file),
            encrypted: self.work_dir.join(&self.encrypted_file),
            metadata: self.work_dir.join(&self.metadata_file),
            decrypted: self.work_dir.join(&self.decrypted_file),
        }
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    /// Returns [`PipelineError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let data = fs::read(path)
            .map_err(|e| PipelineError::Config(format!("read {}: {e}", path.display())))?;
        serde_json::from_slice(&data)
            .map_err(|e| PipelineError::Config(format!("parse {}: {e}", path.display())))
    }

    /// Writes this configuration as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`PipelineError::Config`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| PipelineError::Config(format!("serialize config: {e}")))?;
        fs::write(path, data)
            .map_err(|e| PipelineError::Config(format!("write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let paths = PipelineConfig::in_dir("/data").paths();
        assert_eq!(paths.raw, PathBuf::from("/data/raw_text.txt"));
        assert_eq!(paths.encrypted, PathBuf::from("/data/encrypted_text.txt"));
        assert_eq!(paths.metadata, PathBuf::from("/data/encrypted_text.meta"));
        assert_eq!(paths.decrypted, PathBuf::from("/data/decrypted_text.txt"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: PipelineConfig = serde_json::from_str(r#"{"raw_file":"in.txt"}"#).unwrap();
        assert_eq!(cfg.raw_file, "in.txt");
        assert_eq!(cfg.metadata_file, "encrypted_text.meta");
        assert_eq!(cfg.work_dir, PathBuf::from("."));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut cfg = PipelineConfig::in_dir(dir.path());
        cfg.decrypted_file = "out.txt".into();
        cfg.save(&path).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            PipelineConfig::load(&path),
            Err(PipelineError::Config(_))
        ));
    }
}
