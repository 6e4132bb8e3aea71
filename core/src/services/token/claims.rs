//! Claim extraction from decoded token payloads.
//!
//! Payloads are decoded as raw JSON so that absent claims and claims of the
//! wrong type map to different errors.

use serde_json::{Map, Value};

use crate::domain::entities::token::VerifiedRefreshToken;
use crate::errors::AuthError;

pub(crate) type RawClaims = Map<String, Value>;

/// Reads `userId`; absent or null is `InvalidToken`, non-integer is `UserNotFound`
pub(crate) fn user_id(claims: &RawClaims) -> Result<i64, AuthError> {
    match claims.get("userId") {
        None | Some(Value::Null) => Err(AuthError::InvalidToken),
        Some(value) => parse_user_id(value).ok_or(AuthError::UserNotFound),
    }
}

fn parse_user_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn identifier<'a>(claims: &'a RawClaims, name: &str) -> Option<&'a str> {
    claims
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Reads the refresh token triple
///
/// All three claims must be present before `userId` is parsed, so a payload
/// missing any of them is `InvalidToken` regardless of the others.
pub(crate) fn refresh_identity(claims: &RawClaims) -> Result<VerifiedRefreshToken, AuthError> {
    let (family_id, token_id) = match (
        identifier(claims, "familyId"),
        identifier(claims, "tokenId"),
    ) {
        (Some(family_id), Some(token_id)) => (family_id.to_string(), token_id.to_string()),
        _ => return Err(AuthError::InvalidToken),
    };

    Ok(VerifiedRefreshToken {
        user_id: user_id(claims)?,
        token_id,
        family_id,
    })
}

/// Whether the `exp` claim is missing, malformed or not after `now`
pub(crate) fn is_expired(claims: &RawClaims, now: i64) -> bool {
    claims
        .get("exp")
        .and_then(Value::as_i64)
        .map_or(true, |exp| exp <= now)
}
