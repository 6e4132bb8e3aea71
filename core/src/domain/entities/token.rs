//! Token entities for JWT-based authentication.
//!
//! Access tokens are stateless. Refresh tokens belong to a *family*: the chain
//! of tokens descending from one login. Only the family's current token is
//! accepted, and storage holds at most one row per family.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (1 hour)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Refresh token family expiration time (7 days), reset on every rotation
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Claims signed into an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Authenticated user
    pub user_id: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl AccessClaims {
    /// Creates new claims for an access token issued at `now`
    pub fn new(user_id: i64, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Claims signed into a refresh token
///
/// There is no `exp` claim: a refresh token is only as valid as the stored
/// family row it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    pub family_id: String,
    pub token_id: String,
    pub user_id: i64,
    pub iat: i64,
}

/// Identity extracted from a refresh token that matched its stored family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRefreshToken {
    pub user_id: i64,
    pub token_id: String,
    pub family_id: String,
}

/// Stored record of a refresh token family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenFamily {
    /// Stable identifier shared by every rotation of one login
    pub family_id: String,

    /// The only token of this family that is currently accepted
    pub token_id: String,

    /// Owner of the family
    pub user_id: i64,

    /// Absolute expiry, set at each rotation
    pub valid_until: DateTime<Utc>,

    /// When this row was written
    pub created_at: DateTime<Utc>,
}

/// Outcome of comparing a presented refresh token against its family row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyStatus {
    /// The presented token is the family's current token
    Current,
    /// The family exists but the presented token is not its current one
    Replayed,
    /// The family outlived `valid_until`
    Expired,
}

/// Result of an atomic lookup-and-classify against storage
///
/// `Replayed` and `Expired` mean the store has already deleted the family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyCheck {
    Current(RefreshTokenFamily),
    Missing,
    Replayed,
    Expired,
}

impl RefreshTokenFamily {
    /// Creates a row for `family_id` with a fresh random token id
    pub fn issue(user_id: i64, family_id: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            family_id,
            token_id: new_token_identifier(),
            user_id,
            valid_until: now + ttl,
            created_at: now,
        }
    }

    /// Checks if the family has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until <= now
    }

    /// Classifies a presented `(token_id, user_id)` pair against this row
    ///
    /// Mismatch wins over expiry: a replayed token is reported as such even
    /// if the family has also run out.
    pub fn classify(&self, token_id: &str, user_id: i64, now: DateTime<Utc>) -> FamilyStatus {
        if self.token_id != token_id || self.user_id != user_id {
            FamilyStatus::Replayed
        } else if self.is_expired(now) {
            FamilyStatus::Expired
        } else {
            FamilyStatus::Current
        }
    }

    /// Claims to sign for this row's current token
    pub fn claims(&self, now: DateTime<Utc>) -> RefreshClaims {
        RefreshClaims {
            family_id: self.family_id.clone(),
            token_id: self.token_id.clone(),
            user_id: self.user_id,
            iat: now.timestamp(),
        }
    }
}

/// Generates an opaque random identifier for families and tokens
pub fn new_token_identifier() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(now: DateTime<Utc>) -> RefreshTokenFamily {
        RefreshTokenFamily::issue(7, "family".to_string(), now, Duration::days(7))
    }

    #[test]
    fn test_access_claims_expiry() {
        let now = Utc::now();
        let claims = AccessClaims::new(1, now, Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_access_claims_serialize_user_id_in_camel_case() {
        let claims = AccessClaims::new(42, Utc::now(), Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 42);
    }

    #[test]
    fn test_issue_generates_distinct_token_ids() {
        let now = Utc::now();
        let first = family(now);
        let second = family(now);
        assert_ne!(first.token_id, second.token_id);
        assert_eq!(first.valid_until, now + Duration::days(7));
    }

    #[test]
    fn test_classify_current() {
        let now = Utc::now();
        let row = family(now);
        assert_eq!(row.classify(&row.token_id, 7, now), FamilyStatus::Current);
    }

    #[test]
    fn test_classify_replayed_token_or_user() {
        let now = Utc::now();
        let row = family(now);
        assert_eq!(row.classify("other", 7, now), FamilyStatus::Replayed);
        assert_eq!(row.classify(&row.token_id, 8, now), FamilyStatus::Replayed);
    }

    #[test]
    fn test_classify_expired_at_boundary() {
        let now = Utc::now();
        let row = family(now);
        let later = row.valid_until;
        assert_eq!(row.classify(&row.token_id, 7, later), FamilyStatus::Expired);
        assert_eq!(
            row.classify(&row.token_id, 7, later - Duration::seconds(1)),
            FamilyStatus::Current
        );
    }

    #[test]
    fn test_refresh_claims_have_no_exp() {
        let now = Utc::now();
        let json = serde_json::to_value(family(now).claims(now)).unwrap();
        assert!(json.get("exp").is_none());
        assert_eq!(json["familyId"], "family");
        assert_eq!(json["userId"], 7);
    }
}
