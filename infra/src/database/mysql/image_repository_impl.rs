//! MySQL implementation of the ImageRepository trait.
//!
//! The `likes` counter on `generated_images` is kept in step with the
//! `favourites` table by updating both in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use craiyon_core::domain::entities::image::{
    GeneratedImage, GeneratorModel, NewImage, PublicImage, PublicImageQuery, Resolution, SortBy,
};
use craiyon_core::errors::{DomainError, ImageError};
use craiyon_core::repositories::ImageRepository;
use craiyon_shared::Pagination;

use super::{column, db_error, is_unique_violation};

/// MySQL implementation of ImageRepository
pub struct MySqlImageRepository {
    pool: MySqlPool,
}

impl MySqlImageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_image(row: &MySqlRow) -> Result<GeneratedImage, DomainError> {
        let model: String = column(row, "model")?;
        let resolution: String = column(row, "resolution")?;

        Ok(GeneratedImage {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            prompt: column(row, "prompt")?,
            model: model.parse::<GeneratorModel>().map_err(DomainError::internal)?,
            resolution: resolution
                .parse::<Resolution>()
                .map_err(DomainError::internal)?,
            url: column(row, "url")?,
            is_private: column(row, "is_private")?,
            likes: column(row, "likes")?,
            generated_at: column::<DateTime<Utc>>(row, "generated_at")?,
        })
    }

    /// ORDER BY clause for the public gallery, built only from enum values
    fn order_clause(query: &PublicImageQuery) -> String {
        let column = match query.sort {
            SortBy::Like => "i.likes",
            SortBy::Created => "i.generated_at",
        };
        format!("{} {}, i.id {}", column, query.order.as_sql(), query.order.as_sql())
    }
}

#[async_trait]
impl ImageRepository for MySqlImageRepository {
    async fn create(&self, image: NewImage) -> Result<GeneratedImage, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO generated_images
                (user_id, prompt, model, resolution, url, is_private, likes, generated_at)
            VALUES (?, ?, ?, ?, ?, TRUE, 0, ?)
            "#,
        )
        .bind(image.user_id)
        .bind(&image.prompt)
        .bind(image.model.as_str())
        .bind(image.resolution.as_str())
        .bind(&image.url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to save image"))?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal(format!("Image {} missing after insert", id)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GeneratedImage>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, prompt, model, resolution, url, is_private, likes, generated_at
            FROM generated_images
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find image"))?;

        row.as_ref().map(Self::row_to_image).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<GeneratedImage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, prompt, model, resolution, url, is_private, likes, generated_at
            FROM generated_images
            WHERE user_id = ?
            ORDER BY generated_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list user images"))?;

        rows.iter().map(Self::row_to_image).collect()
    }

    async fn list_public(
        &self,
        viewer: Option<i64>,
        query: PublicImageQuery,
    ) -> Result<Vec<PublicImage>, DomainError> {
        let sql = format!(
            r#"
            SELECT i.id, i.user_id, i.prompt, i.model, i.resolution, i.url,
                   i.is_private, i.likes, i.generated_at,
                   (f.user_id IS NOT NULL) AS liked_by_user
            FROM generated_images i
            LEFT JOIN favourites f ON f.image_id = i.id AND f.user_id = ?
            WHERE i.is_private = FALSE
            ORDER BY {}
            LIMIT ? OFFSET ?
            "#,
            Self::order_clause(&query)
        );

        let rows = sqlx::query(&sql)
            .bind(viewer)
            .bind(query.pagination.limit())
            .bind(query.pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list public images"))?;

        rows.iter()
            .map(|row| {
                let liked: i64 = column(row, "liked_by_user")?;
                Ok(PublicImage {
                    image: Self::row_to_image(row)?,
                    liked_by_user: liked != 0,
                })
            })
            .collect()
    }

    async fn is_favorite(&self, user_id: i64, image_id: i64) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 FROM favourites WHERE user_id = ? AND image_id = ?")
            .bind(user_id)
            .bind(image_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to check favourite"))?;

        Ok(row.is_some())
    }

    async fn add_favorite(&self, user_id: i64, image_id: i64) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("INSERT INTO favourites (user_id, image_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(image_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::from(ImageError::AlreadyFavorite)
                } else {
                    db_error("Failed to add favourite")(e)
                }
            })?;

        sqlx::query("UPDATE generated_images SET likes = likes + 1 WHERE id = ?")
            .bind(image_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to update likes"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit favourite"))?;
        Ok(())
    }

    async fn remove_favorite(&self, user_id: i64, image_id: i64) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let removed = sqlx::query("DELETE FROM favourites WHERE user_id = ? AND image_id = ?")
            .bind(user_id)
            .bind(image_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to remove favourite"))?;

        if removed.rows_affected() == 0 {
            return Err(ImageError::NotFavorite.into());
        }

        sqlx::query("UPDATE generated_images SET likes = GREATEST(likes - 1, 0) WHERE id = ?")
            .bind(image_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to update likes"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit favourite"))?;
        Ok(())
    }

    async fn set_private(&self, image_id: i64, is_private: bool) -> Result<(), DomainError> {
        sqlx::query("UPDATE generated_images SET is_private = ? WHERE id = ?")
            .bind(is_private)
            .bind(image_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update image visibility"))?;

        Ok(())
    }
}
