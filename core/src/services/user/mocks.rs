//! Test doubles for password hashing and mail delivery

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::mail::Mail;
use super::traits::{MailSender, PasswordHasher};

/// Reversible "hash" for fast tests
#[derive(Debug, Clone, Default)]
pub struct MockPasswordHasher;

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, String> {
        Ok(format!("hashed:{}", password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, String> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}

/// Records every mail instead of sending it
#[derive(Debug, Clone, Default)]
pub struct MockMailSender {
    pub sent: Arc<Mutex<Vec<Mail>>>,
    pub should_fail: bool,
}

impl MockMailSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent_mails(&self) -> Vec<Mail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_mail(&self) -> Option<Mail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send(&self, mail: Mail) -> Result<(), String> {
        if self.should_fail {
            return Err("Mail service error".to_string());
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}
