//! Image repository trait for generated image metadata and favorites.

use async_trait::async_trait;
use craiyon_shared::Pagination;

use crate::domain::entities::image::{GeneratedImage, NewImage, PublicImage, PublicImageQuery};
use crate::errors::DomainError;

#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert image metadata; new images are private with zero likes
    async fn create(&self, image: NewImage) -> Result<GeneratedImage, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<GeneratedImage>, DomainError>;

    /// Images generated by a user, newest first
    async fn list_by_user(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<GeneratedImage>, DomainError>;

    /// Public images, flagged with whether `viewer` has favorited each one
    async fn list_public(
        &self,
        viewer: Option<i64>,
        query: PublicImageQuery,
    ) -> Result<Vec<PublicImage>, DomainError>;

    async fn is_favorite(&self, user_id: i64, image_id: i64) -> Result<bool, DomainError>;

    /// Insert a favorite and increment `likes` in one transaction
    ///
    /// Fails with `ImageError::AlreadyFavorite` if the pair exists.
    async fn add_favorite(&self, user_id: i64, image_id: i64) -> Result<(), DomainError>;

    /// Delete a favorite and decrement `likes` in one transaction
    ///
    /// Fails with `ImageError::NotFavorite` if the pair does not exist.
    async fn remove_favorite(&self, user_id: i64, image_id: i64) -> Result<(), DomainError>;

    async fn set_private(&self, image_id: i64, is_private: bool) -> Result<(), DomainError>;
}
