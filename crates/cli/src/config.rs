//! Start-up configuration read from the environment.

use scancheck_observability::{LogFormat, LogOptions};
use thiserror::Error;

pub const ENV_LOG_FORMAT: &str = "SCANCHECK_LOG_FORMAT";
pub const ENV_LOG: &str = "SCANCHECK_LOG";
pub const ENV_DEFAULT_QUANTITY: &str = "SCANCHECK_DEFAULT_QUANTITY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log: LogOptions,
    /// Initial content of the quantity field.
    pub default_quantity: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log: LogOptions::default(),
            default_quantity: 1,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log.format = raw.parse::<LogFormat>().map_err(|message| ConfigError::Invalid {
                var: ENV_LOG_FORMAT,
                message,
            })?;
        }

        if let Some(filter) = lookup(ENV_LOG).filter(|f| !f.trim().is_empty()) {
            config.log.default_filter = filter;
        }

        if let Some(raw) = lookup(ENV_DEFAULT_QUANTITY) {
            config.default_quantity = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|q| *q >= 1)
                .ok_or_else(|| ConfigError::Invalid {
                    var: ENV_DEFAULT_QUANTITY,
                    message: format!("`{raw}` is not a positive whole number"),
                })?;
        }

        Ok(config)
    }
}
