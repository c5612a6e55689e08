//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing: `default_output` must name a known
//! output format and `preferred_network_id` must be non-empty.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::options::OutputFormat;

/// User configuration.
///
/// # Example
///
/// ```toml
/// default_output = "json"
/// preferred_network_id = "12345"
/// non_interactive = false
/// no_color = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Output format used when `--output` is not given
    pub default_output: Option<String>,

    /// Network used when `--network-id` is not given
    pub preferred_network_id: Option<String>,

    /// Never prompt unless `--interactive` is given
    pub non_interactive: Option<bool>,

    /// Disable colored output unless `--color` is given
    pub no_color: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(output) = &self.default_output {
            if OutputFormat::parse(output).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid default_output '{}', must be one of: {}",
                    output,
                    OutputFormat::names().join(", ")
                )));
            }
        }

        if let Some(network) = &self.preferred_network_id {
            if network.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "preferred_network_id cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Settings file written by earlier releases (`config.json`).
///
/// Only the keys that map onto [`GlobalConfig`] are carried over; anything
/// else in the file is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LegacyConfig {
    pub default_output: Option<String>,
    pub preferred_network_id: Option<String>,
    /// Not used; credentials are handled outside this tool.
    pub auth_method: Option<String>,
}

impl From<LegacyConfig> for GlobalConfig {
    fn from(legacy: LegacyConfig) -> Self {
        Self {
            default_output: legacy.default_output,
            preferred_network_id: legacy.preferred_network_id,
            non_interactive: None,
            no_color: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_valid() {
        assert!(GlobalConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_all_keys() {
        let config: GlobalConfig = toml::from_str(
            r#"
            default_output = "yaml"
            preferred_network_id = "net-1"
            non_interactive = true
            no_color = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_output.as_deref(), Some("yaml"));
        assert_eq!(config.non_interactive, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_output_rejected() {
        let config = GlobalConfig {
            default_output: Some("xml".into()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn blank_network_rejected() {
        let config = GlobalConfig {
            preferred_network_id: Some("  ".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<GlobalConfig, _> = toml::from_str("theme = \"dark\"");
        assert!(result.is_err());
    }

    #[test]
    fn legacy_keys_carry_over() {
        let legacy: LegacyConfig = serde_json::from_str(
            r#"{"default_output": "json", "auth_method": "token", "preferred_network_id": "n1"}"#,
        )
        .unwrap();
        let config = GlobalConfig::from(legacy);
        assert_eq!(config.default_output.as_deref(), Some("json"));
        assert_eq!(config.preferred_network_id.as_deref(), Some("n1"));
        assert_eq!(config.non_interactive, None);
    }
}
