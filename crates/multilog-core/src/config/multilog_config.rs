//! Top-level multilog configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ObservabilityConfig, RetryConfig, StreamConfig};
use crate::constants::CONFIG_FILENAME;
use crate::errors::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`MULTILOG_*`)
/// 2. Project config (`multilog.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MultilogConfig {
    pub replica: RetryConfig,
    pub stream: StreamConfig,
    pub observability: ObservabilityConfig,
}

impl MultilogConfig {
    /// Load configuration for a project rooted at `root`.
    ///
    /// A missing `multilog.toml` is not an error; an unparsable one is.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load a specific file, without env overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MultilogConfig) -> Result<(), ConfigError> {
        if config.replica.max_attempts == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "replica.max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.replica.initial_backoff_ms > config.replica.max_backoff_ms {
            return Err(ConfigError::ValidationFailed {
                field: "replica.initial_backoff_ms".to_string(),
                message: "must not exceed replica.max_backoff_ms".to_string(),
            });
        }
        if config.stream.channel_capacity == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "stream.channel_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `MULTILOG_REPLICA_MAX_ATTEMPTS`, `MULTILOG_STREAM_CHANNEL_CAPACITY`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut MultilogConfig) {
        if let Ok(val) = std::env::var("MULTILOG_REPLICA_MAX_ATTEMPTS") {
            if let Ok(v) = val.parse::<u32>() {
                config.replica.max_attempts = v;
            }
        }
        if let Ok(val) = std::env::var("MULTILOG_REPLICA_INITIAL_BACKOFF_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.replica.initial_backoff_ms = v;
            }
        }
        if let Ok(val) = std::env::var("MULTILOG_REPLICA_MAX_BACKOFF_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.replica.max_backoff_ms = v;
            }
        }
        if let Ok(val) = std::env::var("MULTILOG_STREAM_CHANNEL_CAPACITY") {
            if let Ok(v) = val.parse::<usize>() {
                config.stream.channel_capacity = v;
            }
        }
        if let Ok(val) = std::env::var("MULTILOG_LOG_LEVEL") {
            config.observability.log_level = val.to_ascii_lowercase();
        }
        if let Ok(val) = std::env::var("MULTILOG_LOG_JSON") {
            if let Ok(v) = val.parse::<bool>() {
                config.observability.json = v;
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
