//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::{
    FamilyCheck, FamilyStatus, RefreshTokenFamily, VerifiedRefreshToken,
};
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository keyed by family id
#[derive(Clone)]
pub struct MockTokenRepository {
    families: Arc<RwLock<HashMap<String, RefreshTokenFamily>>>,
    fail_revocation: Arc<AtomicBool>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            families: Arc::new(RwLock::new(HashMap::new())),
            fail_revocation: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make `delete_user_families` fail until reset
    pub fn set_fail_revocation(&self, fail: bool) {
        self.fail_revocation.store(fail, Ordering::SeqCst);
    }

    /// Number of stored families
    pub async fn len(&self) -> usize {
        self.families.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.families.read().await.is_empty()
    }

    pub async fn contains_family(&self, family_id: &str) -> bool {
        self.families.read().await.contains_key(family_id)
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn replace_family(&self, family: RefreshTokenFamily) -> Result<(), DomainError> {
        let mut families = self.families.write().await;
        families.insert(family.family_id.clone(), family);
        Ok(())
    }

    async fn rotate_family(
        &self,
        previous_token_id: &str,
        family: RefreshTokenFamily,
    ) -> Result<bool, DomainError> {
        let mut families = self.families.write().await;
        let is_current = families
            .get(&family.family_id)
            .is_some_and(|row| row.token_id == previous_token_id);
        if !is_current {
            return Ok(false);
        }
        families.insert(family.family_id.clone(), family);
        Ok(true)
    }

    async fn find_family(
        &self,
        family_id: &str,
    ) -> Result<Option<RefreshTokenFamily>, DomainError> {
        let families = self.families.read().await;
        Ok(families.get(family_id).cloned())
    }

    async fn check_family(
        &self,
        presented: &VerifiedRefreshToken,
        now: DateTime<Utc>,
    ) -> Result<FamilyCheck, DomainError> {
        // Held across lookup and delete
        let mut families = self.families.write().await;

        let Some(row) = families.get(&presented.family_id) else {
            return Ok(FamilyCheck::Missing);
        };

        match row.classify(&presented.token_id, presented.user_id, now) {
            FamilyStatus::Current => Ok(FamilyCheck::Current(row.clone())),
            FamilyStatus::Replayed => {
                families.remove(&presented.family_id);
                Ok(FamilyCheck::Replayed)
            }
            FamilyStatus::Expired => {
                families.remove(&presented.family_id);
                Ok(FamilyCheck::Expired)
            }
        }
    }

    async fn delete_family(&self, family_id: &str) -> Result<bool, DomainError> {
        let mut families = self.families.write().await;
        Ok(families.remove(family_id).is_some())
    }

    async fn delete_user_families(&self, user_id: i64) -> Result<u64, DomainError> {
        if self.fail_revocation.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Token store unavailable"));
        }
        let mut families = self.families.write().await;
        let before = families.len();
        families.retain(|_, f| f.user_id != user_id);
        Ok((before - families.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut families = self.families.write().await;
        let before = families.len();
        families.retain(|_, f| !f.is_expired(now));
        Ok((before - families.len()) as u64)
    }
}
