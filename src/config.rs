//! Configuration file loading and validation
//!
//! ```json
//! { "data_dir": "./data", "timestamp_field": "timestamp", "lock_timeout_ms": 30000 }
//! ```
//!
//! Blobs live under `<data_dir>/blobs`, records under `<data_dir>/records`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Record field holding the ISO-8601 timestamp
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,

    /// Bound on waiting for a table lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_timestamp_field() -> String {
    "timestamp".to_string()
}
fn default_lock_timeout_ms() -> u64 {
    30_000
}

impl Config {
    /// Configuration with defaults for `data_dir`
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            timestamp_field: default_timestamp_field(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        if self.timestamp_field.is_empty() {
            return Err(ConfigError::Invalid("timestamp_field must not be empty".into()));
        }
        if self.lock_timeout_ms == 0 {
            return Err(ConfigError::Invalid("lock_timeout_ms must be > 0".into()));
        }
        Ok(())
    }

    /// Blob store root
    pub fn blobs_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("blobs")
    }

    /// Record store root
    pub fn records_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("records")
    }

    /// Lock acquisition timeout
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_json(r#"{"data_dir": "/tmp/chrono"}"#).unwrap();
        assert_eq!(config, Config::new("/tmp/chrono"));
        assert_eq!(config.lock_timeout(), Duration::from_secs(30));
        assert_eq!(config.blobs_path(), PathBuf::from("/tmp/chrono/blobs"));
        assert_eq!(config.records_path(), PathBuf::from("/tmp/chrono/records"));
    }

    #[test]
    fn test_data_dir_required() {
        assert!(matches!(Config::from_json("{}"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Config::from_json(r#"{"data_dir": " "}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Config::from_json(r#"{"data_dir": "d", "lock_timeout_ms": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/chronostore.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
