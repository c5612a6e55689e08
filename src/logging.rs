//! logging
//!
//! Diagnostic logging on stderr via `tracing`.
//!
//! # Levels
//!
//! - `warn` by default
//! - `debug` with `--debug`
//! - `$EERO_LOG` (an `EnvFilter` directive such as `eeroctl::engine=trace`)
//!   overrides both
//!
//! The subscriber is installed once options are resolved, because `--debug`
//! and `--no-color` are themselves resolved options.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "EERO_LOG";

/// Logging settings derived from resolved options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub debug: bool,
    pub color: bool,
}

impl LogConfig {
    /// Default directive when `$EERO_LOG` is unset.
    pub fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// Install the global subscriber.
///
/// Later calls are ignored, so tests may call this freely.
pub fn init(config: LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .with_target(config.debug)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_raises_level() {
        let config = LogConfig {
            debug: true,
            color: false,
        };
        assert_eq!(config.default_directive(), "debug");
        assert_eq!(LogConfig::default().default_directive(), "warn");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(LogConfig::default());
        init(LogConfig::default());
    }
}
