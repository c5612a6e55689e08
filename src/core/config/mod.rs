//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration supplies option defaults. Values are resolved in this order
//! (later overrides earlier):
//! 1. Built-in option defaults
//! 2. Config file
//! 3. Command-line occurrences (not handled here)
//!
//! # Locations
//!
//! Searched in order, first hit wins:
//! 1. `$EERO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/eero/config.toml`
//! 3. `~/.config/eero/config.toml`
//! 4. `~/.config/eeroctl/config.json` (legacy, warns)
//!
//! # Example
//!
//! ```no_run
//! use eeroctl::core::config::Config;
//!
//! let result = Config::load().unwrap();
//! for warning in &result.warnings {
//!     eprintln!("warning: {}", warning.message);
//! }
//! println!("Output: {}", result.config.default_output());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, LegacyConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::options::OutputFormat;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "EERO_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Loaded configuration with accessor defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub global: GlobalConfig,
    /// Path the configuration was read from, if any
    path: Option<PathBuf>,
}

/// Where to look for configuration.
///
/// Separated from the process environment so the search can be tested.
#[derive(Debug, Clone, Default)]
pub struct SearchPaths {
    pub explicit: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl SearchPaths {
    /// Read the search locations from the process environment.
    pub fn from_env() -> Self {
        Self {
            explicit: std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }

    fn toml_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(xdg) = &self.xdg_config_home {
            candidates.push(xdg.join("eero/config.toml"));
        }
        if let Some(home) = &self.home {
            candidates.push(home.join(".config/eero/config.toml"));
        }
        candidates
    }

    fn legacy_candidate(&self) -> Option<PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(".config/eeroctl/config.json"))
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation, or if `$EERO_CONFIG` names a missing file.
    /// A missing config file is not an error (defaults are used).
    pub fn load() -> Result<ConfigLoadResult, ConfigError> {
        Self::load_with(&SearchPaths::from_env())
    }

    /// Load configuration using explicit search locations.
    pub fn load_with(paths: &SearchPaths) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        if let Some(explicit) = &paths.explicit {
            if !explicit.exists() {
                return Err(ConfigError::NotFound(explicit.clone()));
            }
            let config = Self::load_from(explicit)?;
            return Ok(ConfigLoadResult { config, warnings });
        }

        for candidate in paths.toml_candidates() {
            if candidate.exists() {
                let config = Self::load_from(&candidate)?;
                return Ok(ConfigLoadResult { config, warnings });
            }
        }

        if let Some(legacy) = paths.legacy_candidate() {
            if legacy.exists() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "Using legacy config file. Please move its settings to '{}'",
                        paths
                            .toml_candidates()
                            .last()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "config.toml".to_string())
                    ),
                    path: legacy.clone(),
                });
                let global = Self::read_legacy(&legacy)?;
                global.validate()?;
                return Ok(ConfigLoadResult {
                    config: Config {
                        global,
                        path: Some(legacy),
                    },
                    warnings,
                });
            }
        }

        Ok(ConfigLoadResult {
            config: Config::default(),
            warnings,
        })
    }

    /// Load and validate a TOML config file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let global = Self::read_toml(path)?;
        global.validate()?;
        Ok(Config {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    fn read_toml(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = read(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn read_legacy(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = read(path)?;
        let legacy: LegacyConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(legacy.into())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Output format used when `--output` is absent.
    ///
    /// Defaults to `table` if not configured.
    pub fn default_output(&self) -> OutputFormat {
        self.global
            .default_output
            .as_deref()
            .and_then(OutputFormat::parse)
            .unwrap_or_default()
    }

    /// Preferred network, if configured.
    pub fn preferred_network_id(&self) -> Option<&str> {
        self.global.preferred_network_id.as_deref()
    }

    /// Defaults to `false` if not configured.
    pub fn non_interactive(&self) -> bool {
        self.global.non_interactive.unwrap_or(false)
    }

    /// Defaults to `false` if not configured.
    pub fn no_color(&self) -> bool {
        self.global.no_color.unwrap_or(false)
    }

    /// Path of the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}
