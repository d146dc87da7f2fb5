//! Engine configuration

use crate::core::format::DEFAULT_PRECISION;
use crate::core::history::History;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON for [`EngineConfig`]
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Tunables for an [`ExpressionEngine`](crate::ExpressionEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Significant digits kept when a result is stored (1-17)
    pub precision: usize,
    /// Text shown in the current pane while an expression is being composed
    pub preview_placeholder: String,
    /// Maximum number of evaluations kept on the history tape
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            preview_placeholder: "...".to_string(),
            history_capacity: History::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl EngineConfig {
    /// Highest precision an `f64` can honour
    pub const MAX_PRECISION: usize = 17;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set result precision
    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set preview placeholder
    #[must_use]
    pub fn with_preview_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.preview_placeholder = placeholder.into();
        self
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Checks every value is in range
    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=Self::MAX_PRECISION).contains(&self.precision) {
            return Err(ConfigError::invalid(format!(
                "precision must be between 1 and {}, got {}",
                Self::MAX_PRECISION,
                self.precision
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON document; missing keys take their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Serializes to pretty JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.precision, 10);
        assert_eq!(config.preview_placeholder, "...");
        assert_eq!(config.history_capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_precision(6)
            .with_preview_placeholder("")
            .with_history_capacity(5);
        assert_eq!(config.precision, 6);
        assert_eq!(config.preview_placeholder, "");
        assert_eq!(config.history_capacity, 5);
    }

    #[test]
    fn test_validate_precision_bounds() {
        assert!(EngineConfig::new().with_precision(0).validate().is_err());
        assert!(EngineConfig::new().with_precision(18).validate().is_err());
        assert!(EngineConfig::new().with_precision(17).validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"precision": 4}"#).unwrap();
        assert_eq!(config.precision, 4);
        assert_eq!(config.preview_placeholder, "...");
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"precision": 40}"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::new().with_precision(8);
        let restored = EngineConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"history_capacity": 3}}"#).unwrap();
        let config = EngineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.history_capacity, 3);
    }

    #[test]
    fn test_from_missing_path() {
        assert!(matches!(
            EngineConfig::from_path("/nonexistent/scicalc.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
