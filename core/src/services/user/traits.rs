//! Traits for password hashing and mail delivery integration

use async_trait::async_trait;

use super::mail::Mail;

/// Trait for a salted slow password hash
///
/// `verify` must compare in constant time.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    async fn hash(&self, password: &str) -> Result<String, String>;
    /// Check a plaintext password against a stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, String>;
}

/// Trait for outbound mail delivery
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: Mail) -> Result<(), String>;
}
