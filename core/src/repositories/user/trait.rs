//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Emails are stored normalized; callers normalize before lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user with its assigned id
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Store a new verification token and its generation time
    async fn set_verification_token(
        &self,
        id: i64,
        token: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Mark the account verified and clear the verification token, but only
    /// while `token` is still the stored one
    ///
    /// Returns `false` when the token was already consumed or replaced.
    async fn mark_verified(&self, id: i64, token: &str) -> Result<bool, DomainError>;

    /// Replace the password hash and clear the verification token, but only
    /// while `token` is still the stored one
    ///
    /// Returns `false` when the token was already consumed or replaced.
    async fn update_password(
        &self,
        id: i64,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
