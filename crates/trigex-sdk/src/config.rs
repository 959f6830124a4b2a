//! Configuration types for the Engine

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use trigex_core::UNRESOLVED_MACRO_STRING;

/// Default bound on accepted input, in bytes
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 65_535;

/// Main engine configuration
///
/// ```yaml
/// max_input_length: 4096
/// unresolved_macro: "n/a"
/// validate_functions: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longer inputs are rejected before scanning
    pub max_input_length: usize,

    /// Replacement for macros that cannot be resolved
    pub unresolved_macro: String,

    /// Check function calls against the catalog when building expressions
    pub validate_functions: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            unresolved_macro: UNRESOLVED_MACRO_STRING.to_string(),
            validate_functions: true,
        }
    }

    /// Load configuration from YAML content; missing fields keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading engine configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Set the input length limit
    pub fn with_max_input_length(mut self, limit: usize) -> Self {
        self.max_input_length = limit;
        self
    }

    /// Set the unresolved macro replacement
    pub fn with_unresolved_macro(mut self, value: impl Into<String>) -> Self {
        self.unresolved_macro = value.into();
        self
    }

    /// Enable function validation
    pub fn with_validate_functions(mut self, enable: bool) -> Self {
        self.validate_functions = enable;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_input_length == 0 {
            return Err(SdkError::ConfigError(
                "max_input_length must be greater than zero".to_string(),
            ));
        }
        if self.unresolved_macro.is_empty() {
            return Err(SdkError::ConfigError(
                "unresolved_macro must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_input_length, 65_535);
        assert_eq!(config.unresolved_macro, "*UNKNOWN*");
        assert!(config.validate_functions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config = EngineConfig::from_yaml_str("unresolved_macro: n/a\n").unwrap();
        assert_eq!(config.unresolved_macro, "n/a");
        assert_eq!(config.max_input_length, DEFAULT_MAX_INPUT_LENGTH);
    }

    #[test]
    fn test_json_form() {
        let config = EngineConfig::new().with_validate_functions(false);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["max_input_length"], 65_535);
        assert_eq!(json["validate_functions"], false);

        let back: EngineConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            EngineConfig::from_yaml_str("max_input_length: 0"),
            Err(SdkError::ConfigError(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str("unresolved_macro: ''"),
            Err(SdkError::ConfigError(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str("max_input_length: lots"),
            Err(SdkError::YamlError(_))
        ));
    }
}
