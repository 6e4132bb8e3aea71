//! User service implementation

use std::sync::Arc;

use chrono::Duration;
use rand::RngCore;
use tracing::{info, warn};

use craiyon_shared::validation::{
    is_valid_email, is_valid_password, normalize_email, MIN_PASSWORD_LENGTH,
};

use crate::clock::Clock;
use crate::domain::entities::user::{NewUser, User, UserProfile, VERIFICATION_TOKEN_BYTES};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::UserServiceConfig;
use super::mail::Mail;
use super::traits::{MailSender, PasswordHasher};

/// Service for user accounts and their credentials
pub struct UserService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repository: Arc<U>,
    /// Used to end every session of a user after a password reset
    token_service: Arc<TokenService<T>>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn MailSender>,
    clock: Arc<dyn Clock>,
    config: UserServiceConfig,
}

impl<U, T> UserService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn MailSender>,
        clock: Arc<dyn Clock>,
        config: UserServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            hasher,
            mailer,
            clock,
            config,
        }
    }

    async fn find_user(&self, id: i64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    fn check_password_policy(password: &str) -> DomainResult<()> {
        if is_valid_password(password) {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )))
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        self.hasher
            .hash(password)
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Checks an email and password pair
    ///
    /// # Errors
    ///
    /// * `UserNotFound` - no account has this email
    /// * `InvalidCredentials` - the password does not match
    pub async fn verify_user(&self, email: &str, password: &str) -> DomainResult<i64> {
        let user = self
            .user_repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let matches = self
            .hasher
            .verify(password, &user.password_hash)
            .await
            .map_err(|e| DomainError::internal(format!("Password verification failed: {}", e)))?;

        if matches {
            Ok(user.id)
        } else {
            Err(AuthError::InvalidCredentials.into())
        }
    }

    /// Creates an account with a hashed password
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> DomainResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Name must not be empty"));
        }
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::validation("Invalid email address"));
        }
        Self::check_password_policy(password)?;

        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .user_repository
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash,
            })
            .await?;

        info!("Created user {}", user.id);
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> DomainResult<UserProfile> {
        Ok(self.find_user(id).await?.profile())
    }

    /// Stores a fresh random token for `user` and returns it
    async fn issue_verification_token(&self, user: &User) -> DomainResult<String> {
        let mut bytes = [0u8; VERIFICATION_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        self.user_repository
            .set_verification_token(user.id, &token, self.clock.now())
            .await?;
        Ok(token)
    }

    /// Mail delivery failures never fail the request
    async fn deliver(&self, mail: Mail) {
        let to = mail.to.clone();
        if let Err(e) = self.mailer.send(mail).await {
            warn!("Failed to send mail to {}: {}", to, e);
        }
    }

    /// Issues a new account verification token and mails the link
    pub async fn request_verification(&self, id: i64) -> DomainResult<()> {
        let user = self.find_user(id).await?;
        self.send_verification(&user).await
    }

    pub(crate) async fn send_verification(&self, user: &User) -> DomainResult<()> {
        let token = self.issue_verification_token(user).await?;
        let url = format!(
            "{}/api/v1/user/verify/{}/{}",
            self.config.domain, user.id, token
        );
        self.deliver(Mail::account_verification(&user.email, &url))
            .await;
        Ok(())
    }

    fn check_token(&self, user: &User, token: &str) -> DomainResult<()> {
        let ttl = Duration::minutes(self.config.verification_token_expiry_minutes);
        if user.accepts_verification_token(token, self.clock.now(), ttl) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken.into())
        }
    }

    /// Marks an account verified if `token` is its current, unexpired token
    pub async fn verify_account(&self, id: i64, token: &str) -> DomainResult<()> {
        let user = self.find_user(id).await?;
        self.check_token(&user, token)?;
        if !self.user_repository.mark_verified(id, token).await? {
            return Err(AuthError::InvalidToken.into());
        }
        Ok(())
    }

    /// Issues a password reset token and mails the link
    pub async fn send_password_reset(&self, email: &str) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self.issue_verification_token(&user).await?;
        let url = format!(
            "{}/reset-password/{}/{}",
            self.config.domain, user.id, token
        );
        self.deliver(Mail::password_reset(&user.email, &url)).await;
        Ok(())
    }

    /// Ends every session of the user, then replaces the password
    ///
    /// Sessions are revoked first so a failed revocation leaves the old
    /// password and the reset token in place.
    pub async fn reset_password(
        &self,
        id: i64,
        token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self.find_user(id).await?;
        self.check_token(&user, token)?;
        Self::check_password_policy(new_password)?;

        let password_hash = self.hash_password(new_password).await?;
        let revoked = self.token_service.revoke_user_sessions(id).await?;

        if !self
            .user_repository
            .update_password(id, token, &password_hash)
            .await?
        {
            return Err(AuthError::InvalidToken.into());
        }

        info!("Password reset for user {} revoked {} sessions", id, revoked);
        Ok(())
    }
}
