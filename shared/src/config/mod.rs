//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token secrets and lifetimes
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and log filter defaults
//! - `image` - Image generation provider and storage
//! - `server` - HTTP server binding

pub mod auth;
pub mod database;
pub mod environment;
pub mod image;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use image::ImageConfig;
pub use server::ServerConfig;

/// Error raised when the loaded configuration cannot be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Public base URL used when building links sent by mail
    pub domain: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Image generation configuration
    pub image: ImageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            domain: String::from("http://localhost:4000"),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            image: ImageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let server = ServerConfig::from_env();
        let domain = std::env::var("DOMAIN")
            .unwrap_or_else(|_| format!("http://localhost:{}", server.port));

        Self {
            environment: Environment::from_env(),
            domain,
            server,
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            image: ImageConfig::from_env(),
        }
    }

    /// Reject configurations that must not be served
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate()?;
        if self.environment.is_production() && self.auth.is_using_default_secrets() {
            return Err(ConfigError(
                "default token secrets are not allowed in production".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
