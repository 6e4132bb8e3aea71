//! Token values handed back to clients after authentication.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserProfile;

/// Freshly issued access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token bound to a token family
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

/// Authentication response returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    pub user: UserProfile,
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, expires_in: i64, user: UserProfile) -> Self {
        Self {
            tokens,
            expires_in,
            user,
        }
    }
}
