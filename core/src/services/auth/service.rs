//! Main authentication service implementation

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::value_objects::{AuthResponse, TokenPair};
use crate::errors::DomainResult;
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;
use crate::services::user::UserService;

/// Authentication service for managing user sessions
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User service for credentials and account mails
    user_service: Arc<UserService<U, T>>,
    /// Token service for JWT management
    token_service: Arc<TokenService<T>>,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_service` - Service for user accounts
    /// * `token_service` - Service for JWT token management
    pub fn new(user_service: Arc<UserService<U, T>>, token_service: Arc<TokenService<T>>) -> Self {
        Self {
            user_service,
            token_service,
        }
    }

    async fn start_session(&self, user_id: i64) -> DomainResult<AuthResponse> {
        let tokens = self.token_service.issue_pair(user_id).await?;
        let user = self.user_service.get_user(user_id).await?;
        Ok(AuthResponse::new(
            tokens,
            self.token_service.access_token_ttl_seconds(),
            user,
        ))
    }

    /// Register a new account and log it in
    ///
    /// A verification mail is sent; failing to send it does not fail
    /// registration.
    ///
    /// # Errors
    ///
    /// * `UserAlreadyExists` - the email is taken
    /// * `Validation` - malformed name, email or password
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        let user = self.user_service.create_user(name, email, password).await?;
        self.user_service.send_verification(&user).await?;

        info!("User {} registered", user.id);
        self.start_session(user.id).await
    }

    /// Log in with email and password, starting an independent session
    ///
    /// # Errors
    ///
    /// * `UserNotFound` - no account has this email
    /// * `InvalidCredentials` - the password does not match
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let user_id = self.user_service.verify_user(email, password).await?;

        debug!("User {} logged in", user_id);
        self.start_session(user_id).await
    }

    /// Exchange a refresh token for a new pair in the same family
    ///
    /// Presenting a token that was already rotated out ends the family, so
    /// both the replayed token and its successor stop working.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let verified = self.token_service.verify_refresh_token(refresh_token).await?;
        self.token_service.rotate(&verified).await
    }

    /// End the session the refresh token belongs to
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let verified = self.token_service.verify_refresh_token(refresh_token).await?;
        self.token_service.revoke_family(&verified.family_id).await?;

        debug!("User {} logged out", verified.user_id);
        Ok(())
    }
}
