//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

const DEFAULT_ACCESS_SECRET: &str = "development-access-secret-change-me";
const DEFAULT_REFRESH_SECRET: &str = "development-refresh-secret-change-me";

/// Token secrets and lifetimes
///
/// Access and refresh tokens are signed with distinct secrets so that a leak
/// of one cannot be used to forge the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret for signing access tokens
    pub access_token_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_token_secret: String,

    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,

    /// Refresh token family lifetime in days, reset on every rotation
    pub refresh_token_expire_days: i64,

    /// Lifetime of account-verification and password-reset links in minutes
    pub verification_token_expire_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_token_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expire_minutes: 60,
            refresh_token_expire_days: 7,
            verification_token_expire_minutes: 30,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_secret: std::env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or(defaults.access_token_secret),
            refresh_token_secret: std::env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or(defaults.refresh_token_secret),
            access_token_expire_minutes: env_or(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                defaults.access_token_expire_minutes,
            ),
            refresh_token_expire_days: env_or(
                "REFRESH_TOKEN_EXPIRE_DAYS",
                defaults.refresh_token_expire_days,
            ),
            verification_token_expire_minutes: env_or(
                "VERIFICATION_TOKEN_EXPIRE_MINUTES",
                defaults.verification_token_expire_minutes,
            ),
        }
    }

    /// Create a configuration with explicit secrets and default lifetimes
    pub fn with_secrets(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access_token_secret: access.into(),
            refresh_token_secret: refresh.into(),
            ..Default::default()
        }
    }

    /// Check the secrets and lifetimes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_secret.is_empty() || self.refresh_token_secret.is_empty() {
            return Err(ConfigError("token secrets must not be empty".to_string()));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(ConfigError(
                "ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ".to_string(),
            ));
        }
        if self.access_token_expire_minutes <= 0
            || self.refresh_token_expire_days <= 0
            || self.verification_token_expire_minutes <= 0
        {
            return Err(ConfigError("token lifetimes must be positive".to_string()));
        }
        Ok(())
    }

    /// Check if either secret is the development default (security warning)
    pub fn is_using_default_secrets(&self) -> bool {
        self.access_token_secret == DEFAULT_ACCESS_SECRET
            || self.refresh_token_secret == DEFAULT_REFRESH_SECRET
    }
}
