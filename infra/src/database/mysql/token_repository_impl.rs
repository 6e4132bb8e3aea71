//! MySQL implementation of the TokenRepository trait.
//!
//! `refresh_tokens` is keyed by `family_id`, so a family never has more than
//! one stored row. Replacement and the replay check each run in a single
//! transaction; the check locks the family row with `SELECT ... FOR UPDATE`
//! so two requests presenting tokens of the same family are serialized.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Transaction};

use craiyon_core::domain::entities::token::{
    FamilyCheck, FamilyStatus, RefreshTokenFamily, VerifiedRefreshToken,
};
use craiyon_core::errors::DomainError;
use craiyon_core::repositories::TokenRepository;

use super::{column, db_error};

const SELECT_FAMILY: &str = r#"
    SELECT family_id, token_id, user_id, valid_until, created_at
    FROM refresh_tokens
    WHERE family_id = ?
"#;

const LOCK_FAMILY: &str = r#"
    SELECT family_id, token_id, user_id, valid_until, created_at
    FROM refresh_tokens
    WHERE family_id = ?
    FOR UPDATE
"#;

const DELETE_CURRENT: &str = r#"
    DELETE FROM refresh_tokens
    WHERE family_id = ? AND token_id = ?
"#;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_family(row: &MySqlRow) -> Result<RefreshTokenFamily, DomainError> {
        Ok(RefreshTokenFamily {
            family_id: column(row, "family_id")?,
            token_id: column(row, "token_id")?,
            user_id: column(row, "user_id")?,
            valid_until: column::<DateTime<Utc>>(row, "valid_until")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    async fn insert_family(
        tx: &mut Transaction<'_, MySql>,
        family: &RefreshTokenFamily,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (family_id, token_id, user_id, valid_until, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&family.family_id)
        .bind(&family.token_id)
        .bind(family.user_id)
        .bind(family.valid_until)
        .bind(family.created_at)
        .execute(&mut **tx)
        .await
        .map_err(db_error("Failed to save refresh token"))?;
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn replace_family(&self, family: RefreshTokenFamily) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("DELETE FROM refresh_tokens WHERE family_id = ?")
            .bind(&family.family_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete refresh token family"))?;

        Self::insert_family(&mut tx, &family).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit refresh token"))?;
        Ok(())
    }

    async fn rotate_family(
        &self,
        previous_token_id: &str,
        family: RefreshTokenFamily,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let deleted = sqlx::query(DELETE_CURRENT)
            .bind(&family.family_id)
            .bind(previous_token_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to rotate refresh token family"))?
            .rows_affected();

        // Revoked or already rotated; dropping the transaction rolls back
        if deleted == 0 {
            return Ok(false);
        }

        Self::insert_family(&mut tx, &family).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit refresh token"))?;
        Ok(true)
    }

    async fn find_family(
        &self,
        family_id: &str,
    ) -> Result<Option<RefreshTokenFamily>, DomainError> {
        let row = sqlx::query(SELECT_FAMILY)
            .bind(family_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token family"))?;

        row.as_ref().map(Self::row_to_family).transpose()
    }

    async fn check_family(
        &self,
        presented: &VerifiedRefreshToken,
        now: DateTime<Utc>,
    ) -> Result<FamilyCheck, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let row = sqlx::query(LOCK_FAMILY)
            .bind(&presented.family_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock refresh token family"))?;

        let Some(row) = row else {
            return Ok(FamilyCheck::Missing);
        };
        let family = Self::row_to_family(&row)?;

        let check = match family.classify(&presented.token_id, presented.user_id, now) {
            FamilyStatus::Current => {
                tx.commit()
                    .await
                    .map_err(db_error("Failed to commit refresh token check"))?;
                return Ok(FamilyCheck::Current(family));
            }
            FamilyStatus::Replayed => {
                tracing::warn!(
                    "Refresh token replay detected for family {} of user {}, revoking family",
                    family.family_id,
                    family.user_id
                );
                FamilyCheck::Replayed
            }
            FamilyStatus::Expired => FamilyCheck::Expired,
        };

        sqlx::query("DELETE FROM refresh_tokens WHERE family_id = ?")
            .bind(&family.family_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete refresh token family"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit refresh token check"))?;
        Ok(check)
    }

    async fn delete_family(&self, family_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE family_id = ?")
            .bind(family_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete refresh token family"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_user_families(&self, user_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user refresh tokens"))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE valid_until <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete expired refresh tokens"))?;

        Ok(result.rows_affected())
    }
}
