//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, Role, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Overwrite a stored user, bypassing the repository contract
    pub async fn put(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    async fn modify<F>(&self, id: i64, f: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(AuthError::UserNotFound)?;
        f(user);
        Ok(())
    }

    /// Apply `f` only if `token` is the user's stored verification token
    async fn consume_token<F>(&self, id: i64, token: &str, f: F) -> Result<bool, DomainError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };
        if user.verification_token.as_deref() != Some(token) {
            return Ok(false);
        }
        f(user);
        user.verification_token = None;
        user.token_generated_at = None;
        Ok(true)
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: Role::User,
            verified: false,
            verification_token: None,
            token_generated_at: None,
            created_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn set_verification_token(
        &self,
        id: i64,
        token: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let token = token.to_string();
        self.modify(id, move |user| {
            user.verification_token = Some(token);
            user.token_generated_at = Some(generated_at);
        })
        .await
    }

    async fn mark_verified(&self, id: i64, token: &str) -> Result<bool, DomainError> {
        self.consume_token(id, token, |user| user.verified = true).await
    }

    async fn update_password(
        &self,
        id: i64,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let password_hash = password_hash.to_string();
        self.consume_token(id, token, move |user| user.password_hash = password_hash)
            .await
    }
}
