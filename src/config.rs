//! Configuration Module
//!
//! Handles loading and validating configuration from environment variables.

use std::env;

use thiserror::Error;

use crate::cache::DEFAULT_SWEEP_INTERVAL_SECS;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of distinct keys the store admits
    pub max_size: usize,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `STORE_MAX_SIZE` - Maximum distinct keys (default: 1000)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: parse_var("STORE_MAX_SIZE").unwrap_or(defaults.max_size),
            sweep_interval: parse_var("SWEEP_INTERVAL_SECS").unwrap_or(defaults.sweep_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `max_size` or `sweep_interval` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::Invalid {
                field: "max_size".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.sweep_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "sweep_interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: 1000,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            server_port: 3000,
        }
    }
}
