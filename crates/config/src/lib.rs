//! Configuration management for the tourist information webhook
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, then `config/{env}.*`)
//! - Environment variables (`TOURIST_WEBHOOK__` prefix, `__` separator)
//!
//! Reply texts and other fixed values live in [`constants`].

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, RuntimeEnvironment, ServerConfig,
    Settings, StoreBackend, StoreConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
