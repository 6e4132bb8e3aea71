//! User entity representing a registered account.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of random bytes in an account-verification / password-reset token
pub const VERIFICATION_TOKEN_BYTES: usize = 16;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Member => "MEMBER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "MEMBER" => Ok(Role::Member),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Stored user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,

    /// Salted slow hash of the password
    pub password_hash: String,

    pub role: Role,

    /// Whether the email address has been confirmed
    pub verified: bool,

    /// Pending account-verification or password-reset token
    pub verification_token: Option<String>,

    /// When `verification_token` was generated
    pub token_generated_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

/// Data needed to insert a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            verified: self.verified,
        }
    }

    /// Checks a presented verification token against the stored one
    ///
    /// The token must match exactly and be younger than `ttl`.
    pub fn accepts_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> bool {
        match (&self.verification_token, self.token_generated_at) {
            (Some(stored), Some(generated_at)) => stored == token && now - generated_at <= ttl,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_token(generated_at: DateTime<Utc>) -> User {
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
            verified: false,
            verification_token: Some("abc123".to_string()),
            token_generated_at: Some(generated_at),
            created_at: generated_at,
        }
    }

    #[test]
    fn test_token_accepted_within_ttl() {
        let now = Utc::now();
        let user = user_with_token(now - Duration::minutes(29));
        assert!(user.accepts_verification_token("abc123", now, Duration::minutes(30)));
    }

    #[test]
    fn test_token_rejected_after_ttl() {
        let now = Utc::now();
        let user = user_with_token(now - Duration::minutes(31));
        assert!(!user.accepts_verification_token("abc123", now, Duration::minutes(30)));
    }

    #[test]
    fn test_wrong_or_missing_token_rejected() {
        let now = Utc::now();
        let mut user = user_with_token(now);
        assert!(!user.accepts_verification_token("nope", now, Duration::minutes(30)));

        user.verification_token = None;
        assert!(!user.accepts_verification_token("abc123", now, Duration::minutes(30)));
    }

    #[test]
    fn test_profile_hides_credentials() {
        let user = user_with_token(Utc::now());
        let json = serde_json::to_value(user.profile()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "USER");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("root".parse::<Role>().is_err());
    }
}
