//! Configuration for the user service

use craiyon_shared::AppConfig;

/// Configuration for the user service
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Public base URL used in mailed links
    pub domain: String,
    /// Lifetime of verification and password reset tokens in minutes
    pub verification_token_expiry_minutes: i64,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            domain: "http://localhost:4000".to_string(),
            verification_token_expiry_minutes: 30,
        }
    }
}

impl From<&AppConfig> for UserServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            domain: config.domain.trim_end_matches('/').to_string(),
            verification_token_expiry_minutes: config.auth.verification_token_expire_minutes,
        }
    }
}
