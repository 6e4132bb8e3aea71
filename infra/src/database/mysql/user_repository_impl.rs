//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use craiyon_core::domain::entities::user::{NewUser, Role, User};
use craiyon_core::errors::{AuthError, DomainError};
use craiyon_core::repositories::UserRepository;

use super::{column, db_error, is_unique_violation};

const SELECT_BY_ID: &str = r#"
    SELECT id, name, email, password, role, verified,
           verification_token, token_generated_at, created_at
    FROM users
    WHERE id = ?
    LIMIT 1
"#;

const SELECT_BY_EMAIL: &str = r#"
    SELECT id, name, email, password, role, verified,
           verification_token, token_generated_at, created_at
    FROM users
    WHERE email = ?
    LIMIT 1
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let role: String = column(row, "role")?;

        Ok(User {
            id: column(row, "id")?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            password_hash: column(row, "password")?,
            role: role.parse::<Role>().map_err(DomainError::internal)?,
            verified: column(row, "verified")?,
            verification_token: column(row, "verification_token")?,
            token_generated_at: column::<Option<DateTime<Utc>>>(row, "token_generated_at")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(SELECT_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password, role, verified)
            VALUES (?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Role::User.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::from(AuthError::UserAlreadyExists)
            } else {
                db_error("Failed to create user")(e)
            }
        })?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal(format!("User {} missing after insert", id)))
    }

    async fn set_verification_token(
        &self,
        id: i64,
        token: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET verification_token = ?, token_generated_at = ? WHERE id = ?",
        )
        .bind(token)
        .bind(generated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to store verification token"))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }
        Ok(())
    }

    async fn mark_verified(&self, id: i64, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET verified = TRUE, verification_token = NULL, token_generated_at = NULL
            WHERE id = ? AND verification_token = ?
            "#,
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to verify user"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_password(
        &self,
        id: i64,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = ?, verification_token = NULL, token_generated_at = NULL
            WHERE id = ? AND verification_token = ?
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update password"))?;

        Ok(result.rows_affected() == 1)
    }
}
