//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{server, store};
use crate::ConfigError;

/// Prefix of environment variable overrides, e.g. `TOURIST_WEBHOOK__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "TOURIST_WEBHOOK";

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Record store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Whole-request timeout applied by the HTTP layer
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    server::DEFAULT_PORT
}
fn default_true() -> bool {
    true
}
fn default_request_timeout() -> u64 {
    server::DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Which record store backend serves queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Firebase Realtime Database over its REST API
    Firebase,
    /// In-process store, optionally seeded from a JSON export
    #[default]
    Memory,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Database root URL, e.g. `https://my-project.firebaseio.com`
    #[serde(default)]
    pub database_url: Option<String>,

    /// Database secret or ID token passed as the `auth` query parameter
    #[serde(default)]
    pub auth_token: Option<String>,

    /// JSON export used to seed the memory backend
    #[serde(default)]
    pub seed_path: Option<String>,

    /// Deadline around each store query
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_query_timeout_ms() -> u64 {
    store::DEFAULT_QUERY_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database_url: None,
            auth_token: None,
            seed_path: None,
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

/// Logging and metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_store()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.request_timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && server.cors_enabled && server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 This may block legitimate requests."
            );
        }

        Ok(())
    }

    fn validate_store(&self) -> Result<(), ConfigError> {
        let store_config = &self.store;

        if !(store::MIN_QUERY_TIMEOUT_MS..=store::MAX_QUERY_TIMEOUT_MS)
            .contains(&store_config.query_timeout_ms)
        {
            return Err(ConfigError::InvalidValue {
                field: "store.query_timeout_ms".to_string(),
                message: format!(
                    "Must be between {} and {}, got {}",
                    store::MIN_QUERY_TIMEOUT_MS,
                    store::MAX_QUERY_TIMEOUT_MS,
                    store_config.query_timeout_ms
                ),
            });
        }

        if store_config.query_timeout_ms >= self.server.request_timeout_seconds * 1000 {
            tracing::warn!(
                query_timeout_ms = store_config.query_timeout_ms,
                request_timeout_seconds = self.server.request_timeout_seconds,
                "Store query timeout is not shorter than the request timeout; \
                 the fallback reply may never be sent"
            );
        }

        match store_config.backend {
            StoreBackend::Firebase => {
                let url = store_config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingField("store.database_url".to_string()))?;
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(ConfigError::InvalidValue {
                        field: "store.database_url".to_string(),
                        message: format!("Must be an http(s) URL, got {}", url),
                    });
                }
            },
            StoreBackend::Memory => {
                if self.environment.is_strict() {
                    tracing::warn!(
                        environment = ?self.environment,
                        "Memory store backend configured outside development"
                    );
                }
            },
        }

        Ok(())
    }
}

/// Load settings from `config/` in the working directory
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit configuration directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_file = dir.join("default");
    builder = builder.add_source(File::with_name(&default_file.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_file = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_file.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
