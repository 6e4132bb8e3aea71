//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::clock::Clock;
use crate::domain::entities::token::{
    new_token_identifier, AccessClaims, FamilyCheck, RefreshTokenFamily, VerifiedRefreshToken,
};
use crate::domain::value_objects::TokenPair;
use crate::errors::{AuthError, DomainError};
use crate::repositories::TokenRepository;

use super::claims::{self, RawClaims};
use super::config::TokenServiceConfig;

/// Signing material for one token class
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Service for issuing, verifying and rotating access and refresh tokens
///
/// Holds no session state of its own: every refresh verification goes to the
/// repository. Errors are returned, never logged.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: Arc<R>,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
    access_keys: Keys,
    refresh_keys: Keys,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token family storage
    /// * `clock` - Time source for every expiry decision
    /// * `config` - Secrets and lifetimes
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an error if the secrets are empty or shared
    pub fn new(
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        // Expiry is checked against the injected clock, not the system time
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            repository,
            clock,
            access_keys: Keys::from_secret(&config.access_token_secret),
            refresh_keys: Keys::from_secret(&config.refresh_token_secret),
            config,
            validation,
        })
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.config.access_token_expiry_minutes * 60
    }

    fn refresh_ttl(&self) -> Duration {
        Duration::days(self.config.refresh_token_expiry_days)
    }

    fn sign<T: Serialize>(&self, claims: &T, keys: &Keys) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| DomainError::internal(format!("Token signing failed: {}", e)))
    }

    fn decode_raw(&self, token: &str, keys: &Keys) -> Result<RawClaims, AuthError> {
        decode::<RawClaims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Signs `{userId, iat, exp}` with the access secret
    pub fn create_access_token(&self, user_id: i64) -> Result<String, DomainError> {
        let claims = AccessClaims::new(
            user_id,
            self.clock.now(),
            Duration::minutes(self.config.access_token_expiry_minutes),
        );
        self.sign(&claims, &self.access_keys)
    }

    /// Issues a refresh token, starting a new family or rotating an existing one
    ///
    /// With `family_id`, every stored row of that family is replaced, which
    /// invalidates the token being rotated out. Without it a new family is
    /// started. A fresh token id is generated either way.
    pub async fn create_refresh_token(
        &self,
        user_id: i64,
        family_id: Option<&str>,
    ) -> Result<String, DomainError> {
        let now = self.clock.now();
        let family_id = family_id
            .map(str::to_string)
            .unwrap_or_else(new_token_identifier);

        let family = RefreshTokenFamily::issue(user_id, family_id, now, self.refresh_ttl());
        let claims = family.claims(now);

        self.repository.replace_family(family).await?;
        self.sign(&claims, &self.refresh_keys)
    }

    /// Verifies an access token and returns its user id
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - bad signature, malformed, expired, or no `userId`
    /// * `UserNotFound` - `userId` present but not an integer
    pub fn verify_access_token(&self, token: &str) -> Result<i64, DomainError> {
        let raw = self.decode_raw(token, &self.access_keys)?;

        if claims::is_expired(&raw, self.clock.now().timestamp()) {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(claims::user_id(&raw)?)
    }

    /// Verifies a refresh token against its stored family
    ///
    /// A token that is not the family's current one is treated as a replay:
    /// the whole family is deleted so the legitimate holder's token dies
    /// too. An expired family is deleted the same way. Both fail with
    /// `InvalidToken`, as does a family that no longer exists.
    pub async fn verify_refresh_token(
        &self,
        token: &str,
    ) -> Result<VerifiedRefreshToken, DomainError> {
        let raw = self.decode_raw(token, &self.refresh_keys)?;
        let presented = claims::refresh_identity(&raw)?;

        match self
            .repository
            .check_family(&presented, self.clock.now())
            .await?
        {
            FamilyCheck::Current(_) => Ok(presented),
            FamilyCheck::Missing | FamilyCheck::Replayed | FamilyCheck::Expired => {
                Err(AuthError::InvalidToken.into())
            }
        }
    }

    /// Issues an access token and a refresh token in a new family
    pub async fn issue_pair(&self, user_id: i64) -> Result<TokenPair, DomainError> {
        let access_token = self.create_access_token(user_id)?;
        let refresh_token = self.create_refresh_token(user_id, None).await?;
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Rotates a verified refresh token within its family
    ///
    /// The swap only happens while the verified token is still the family's
    /// current one. A family revoked or rotated since verification stays
    /// dead and the call fails with `InvalidToken`.
    pub async fn rotate(&self, verified: &VerifiedRefreshToken) -> Result<TokenPair, DomainError> {
        let now = self.clock.now();
        let family = RefreshTokenFamily::issue(
            verified.user_id,
            verified.family_id.clone(),
            now,
            self.refresh_ttl(),
        );
        let claims = family.claims(now);

        if !self
            .repository
            .rotate_family(&verified.token_id, family)
            .await?
        {
            return Err(AuthError::InvalidToken.into());
        }

        let refresh_token = self.sign(&claims, &self.refresh_keys)?;
        let access_token = self.create_access_token(verified.user_id)?;
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Deletes one family, ending that session
    pub async fn revoke_family(&self, family_id: &str) -> Result<bool, DomainError> {
        self.repository.delete_family(family_id).await
    }

    /// Deletes every family of a user, ending all of their sessions
    pub async fn revoke_user_sessions(&self, user_id: i64) -> Result<u64, DomainError> {
        self.repository.delete_user_families(user_id).await
    }

    /// Removes expired families from storage
    pub async fn cleanup_expired(&self) -> Result<u64, DomainError> {
        self.repository.delete_expired(self.clock.now()).await
    }
}
