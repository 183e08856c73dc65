// Configuration module for kafka_fetch
//
// Settings are read from environment variables and clamped to the ranges
// defined in kafka::constants, the same way bounded settings are validated
// everywhere else in the crate.

use crate::kafka::constants::{
    DEFAULT_LOG_TRUNCATION, DEFAULT_MAX_MESSAGE_SET_SIZE, ENV_LOG_TRUNCATION,
    ENV_MAX_MESSAGE_SET_SIZE, MAX_MAX_MESSAGE_SET_SIZE, MIN_MAX_MESSAGE_SET_SIZE,
};
use crate::kafka::error::{FetchError, Result};

/// Configuration struct holding all kafka_fetch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Largest declared message set size accepted at construction (bytes)
    pub max_message_set_size: i32,
    /// Log truncation drains at info level instead of debug
    pub log_truncation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_message_set_size: DEFAULT_MAX_MESSAGE_SET_SIZE,
            log_truncation: DEFAULT_LOG_TRUNCATION,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(ENV_MAX_MESSAGE_SET_SIZE) {
            let size: i64 = raw.trim().parse().map_err(|_| {
                FetchError::InvalidConfig(format!(
                    "{}={:?} is not an integer",
                    ENV_MAX_MESSAGE_SET_SIZE, raw
                ))
            })?;
            config.max_message_set_size = size
                .clamp(MIN_MAX_MESSAGE_SET_SIZE as i64, MAX_MAX_MESSAGE_SET_SIZE as i64)
                as i32;
        }

        if let Some(raw) = lookup(ENV_LOG_TRUNCATION) {
            config.log_truncation = parse_bool(&raw).ok_or_else(|| {
                FetchError::InvalidConfig(format!(
                    "{}={:?} is not a boolean",
                    ENV_LOG_TRUNCATION, raw
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
