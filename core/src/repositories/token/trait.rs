//! Token repository trait defining the interface for refresh token family persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::{FamilyCheck, RefreshTokenFamily, VerifiedRefreshToken};
use crate::errors::DomainError;

/// Repository trait for refresh token families
///
/// Storage holds at most one row per `family_id`. Every write that touches a
/// family must be atomic with respect to concurrent `check_family` calls on
/// the same family.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Delete every stored row of `family.family_id` and insert `family`
    ///
    /// Delete and insert happen in one transaction, so a concurrent reader
    /// sees either the old row or the new one, never neither.
    async fn replace_family(&self, family: RefreshTokenFamily) -> Result<(), DomainError>;

    /// Swap the stored row of `family.family_id` for `family`, but only while
    /// `previous_token_id` is still the family's current token
    ///
    /// # Returns
    /// * `Ok(true)` - the old row was deleted and `family` inserted
    /// * `Ok(false)` - the family is gone or holds another token; nothing was written
    async fn rotate_family(
        &self,
        previous_token_id: &str,
        family: RefreshTokenFamily,
    ) -> Result<bool, DomainError>;

    /// Find the stored row of a family
    async fn find_family(&self, family_id: &str) -> Result<Option<RefreshTokenFamily>, DomainError>;

    /// Look up the family of a presented token and classify it
    ///
    /// # Returns
    /// * `FamilyCheck::Current(row)` - presented token is current; nothing changes
    /// * `FamilyCheck::Missing` - no row for the family
    /// * `FamilyCheck::Replayed` - token or user mismatch; the family was deleted
    /// * `FamilyCheck::Expired` - `valid_until <= now`; the family was deleted
    ///
    /// The lookup and the delete are one atomic operation.
    async fn check_family(
        &self,
        presented: &VerifiedRefreshToken,
        now: DateTime<Utc>,
    ) -> Result<FamilyCheck, DomainError>;

    /// Delete a family
    ///
    /// # Returns
    /// * `Ok(true)` - a row was deleted
    /// * `Ok(false)` - the family did not exist
    async fn delete_family(&self, family_id: &str) -> Result<bool, DomainError>;

    /// Delete every family owned by a user, returning how many were removed
    async fn delete_user_families(&self, user_id: i64) -> Result<u64, DomainError>;

    /// Delete families whose `valid_until` is not after `now`
    ///
    /// Expired rows are already rejected by `check_family`; this only
    /// reclaims storage.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
