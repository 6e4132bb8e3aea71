//! Configuration for the token service

use craiyon_shared::AuthConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};
use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 secret for access tokens
    pub access_token_secret: String,
    /// HS256 secret for refresh tokens, never equal to the access secret
    pub refresh_token_secret: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token family expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_secret: "development-access-secret-please-change".to_string(),
            refresh_token_secret: "development-refresh-secret-please-change".to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl TokenServiceConfig {
    /// Rejects configurations where one secret could forge the other token class
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.access_token_secret.is_empty() || self.refresh_token_secret.is_empty() {
            return Err(DomainError::internal("Token secrets must not be empty"));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(DomainError::internal(
                "Access and refresh token secrets must differ",
            ));
        }
        if self.access_token_expiry_minutes <= 0 || self.refresh_token_expiry_days <= 0 {
            return Err(DomainError::internal("Token lifetimes must be positive"));
        }
        Ok(())
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_token_secret: config.access_token_secret.clone(),
            refresh_token_secret: config.refresh_token_secret.clone(),
            access_token_expiry_minutes: config.access_token_expire_minutes,
            refresh_token_expiry_days: config.refresh_token_expire_days,
        }
    }
}
