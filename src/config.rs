use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Consultriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum rejection comment length, in characters after trimming.
pub const DEFAULT_MIN_REJECTION_REASON_CHARS: usize = 20;

/// Name of the engine config file inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "engine.json";

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "consultriage=info"
}

/// Per-user configuration directory, e.g. `~/.config/consultriage/`.
///
/// `None` when the platform exposes no config directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME.to_lowercase()))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunables for the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rejection comments shorter than this are refused.
    pub min_rejection_reason_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_rejection_reason_chars: DEFAULT_MIN_REJECTION_REASON_CHARS,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No engine config, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `<config_dir>/engine.json`, or defaults when there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        match config_dir() {
            Some(dir) => Self::load(&dir.join(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rejection_reason_chars == 0 {
            return Err(ConfigError::Invalid(
                "min_rejection_reason_chars must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_app_name() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with("consultriage"));
        }
    }

    #[test]
    fn default_requires_twenty_chars() {
        assert_eq!(EngineConfig::default().min_rejection_reason_chars, 20);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "min_rejection_reason_chars": 40 }"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.min_rejection_reason_chars, 40);
    }

    #[test]
    fn empty_object_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(EngineConfig::load(&path).unwrap(), EngineConfig::default());
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "min_rejection_reason_chars = 40").unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_minimum_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "min_rejection_reason_chars": 0 }"#).unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn log_filter_targets_crate() {
        assert!(default_log_filter().starts_with("consultriage"));
    }
}
