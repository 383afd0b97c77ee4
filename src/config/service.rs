//! Service configuration loaded from file and environment

use crate::backend::catalog::ProviderKey;
use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable consulted when no admin token is configured
pub const ADMIN_TOKEN_ENV: &str = "ADMIN_TOKEN";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    /// Endpoint per provider; providers without one cannot generate
    #[serde(default)]
    pub providers: BTreeMap<ProviderKey, ProviderEndpointConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Admin authentication.
///
/// With no token every admin request is allowed. This is the local
/// development mode and must not be used on a reachable host.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub admin_token: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Upstream image API for one provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderEndpointConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Client-level cap; the per-request generation timeout is usually shorter
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_timeout() -> u64 {
    120_000
}

impl AuthConfig {
    /// The configured token, treating an empty string as unset
    pub fn token(&self) -> Option<&str> {
        self.admin_token.as_deref().filter(|t| !t.is_empty())
    }
}

impl ServiceConfig {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_str().ok_or_else(|| {
            AppError::Config(config::ConfigError::Message(
                "Configuration path is not valid UTF-8".to_string(),
            ))
        })?;

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", 3000)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            // Load from configuration file
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (prefixed with IMAGEGEN_)
            .add_source(
                Environment::with_prefix("IMAGEGEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: ServiceConfig = config.try_deserialize()?;
        if settings.auth.token().is_none() {
            settings.auth.admin_token = std::env::var(ADMIN_TOKEN_ENV).ok();
        }
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        for (provider, endpoint) in &self.providers {
            if endpoint.endpoint.trim().is_empty() {
                return Err(AppError::Config(config::ConfigError::Message(format!(
                    "Provider '{}' must have a non-empty endpoint",
                    provider
                ))));
            }
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            auth: AuthConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            providers: BTreeMap::new(),
        }
    }
}
