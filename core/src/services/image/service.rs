//! Image service implementation

use std::sync::Arc;
use tracing::{info, warn};

use craiyon_shared::Pagination;

use crate::domain::entities::image::{
    GeneratedImage, GeneratorModel, ImageView, NewImage, PublicImageQuery, Resolution,
};
use crate::errors::{DomainError, DomainResult, ImageError};
use crate::repositories::ImageRepository;

use super::traits::{ImageGenerator, ImageStorage};

/// Longest prompt forwarded to the provider
const MAX_PROMPT_LENGTH: usize = 1000;

/// Service for generated images
pub struct ImageService<I: ImageRepository> {
    repository: Arc<I>,
    generator: Arc<dyn ImageGenerator>,
    storage: Arc<dyn ImageStorage>,
}

impl<I: ImageRepository> ImageService<I> {
    pub fn new(
        repository: Arc<I>,
        generator: Arc<dyn ImageGenerator>,
        storage: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            repository,
            generator,
            storage,
        }
    }

    /// Generate an image, store the file and record it as private
    ///
    /// # Returns
    ///
    /// The id of the new image
    pub async fn generate(
        &self,
        user_id: i64,
        prompt: &str,
        model: GeneratorModel,
        resolution: Resolution,
    ) -> DomainResult<i64> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(DomainError::validation(
                "Prompt is missing, cannot generate image without prompt",
            ));
        }
        if prompt.chars().count() > MAX_PROMPT_LENGTH {
            return Err(DomainError::validation(format!(
                "Prompt must be at most {} characters",
                MAX_PROMPT_LENGTH
            )));
        }

        let bytes = self
            .generator
            .generate(prompt, resolution)
            .await
            .map_err(|message| ImageError::GenerationFailed { message })?;

        let url = self
            .storage
            .save(&bytes)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to store image: {}", e)))?;

        let created = self
            .repository
            .create(NewImage {
                user_id,
                prompt: prompt.to_string(),
                model,
                resolution,
                url: url.clone(),
            })
            .await;

        let image = match created {
            Ok(image) => image,
            Err(error) => {
                // No row points at the file
                if let Err(e) = self.storage.delete(&url).await {
                    warn!("Failed to remove orphaned image {}: {}", url, e);
                }
                return Err(error);
            }
        };

        info!("User {} generated image {}", user_id, image.id);
        Ok(image.id)
    }

    /// Find an image visible to `viewer`: public, or owned by the viewer
    pub async fn get_image(&self, viewer: Option<i64>, id: i64) -> DomainResult<GeneratedImage> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|image| image.is_visible_to(viewer))
            .ok_or_else(|| ImageError::ImageNotFound.into())
    }

    /// Read the file of an image visible to `viewer`
    pub async fn load_image(
        &self,
        viewer: Option<i64>,
        id: i64,
    ) -> DomainResult<(GeneratedImage, Vec<u8>)> {
        let image = self.get_image(viewer, id).await?;
        let bytes = self
            .storage
            .load(&image.url)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to read image {}: {}", id, e)))?;
        Ok((image, bytes))
    }

    pub async fn list_user_images(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> DomainResult<Vec<ImageView>> {
        let images = self
            .repository
            .list_by_user(user_id, pagination.validate())
            .await?;
        Ok(images.into_iter().map(ImageView::from).collect())
    }

    pub async fn list_public_images(
        &self,
        viewer: Option<i64>,
        mut query: PublicImageQuery,
    ) -> DomainResult<Vec<ImageView>> {
        query.pagination = query.pagination.validate();
        let images = self.repository.list_public(viewer, query).await?;
        Ok(images.into_iter().map(ImageView::from).collect())
    }

    /// Only public images can be favorited
    async fn public_image(&self, image_id: i64) -> DomainResult<GeneratedImage> {
        self.repository
            .find_by_id(image_id)
            .await?
            .filter(|image| !image.is_private)
            .ok_or_else(|| ImageError::ImageNotFound.into())
    }

    pub async fn is_favorite(&self, user_id: i64, image_id: i64) -> DomainResult<bool> {
        self.public_image(image_id).await?;
        self.repository.is_favorite(user_id, image_id).await
    }

    pub async fn add_favorite(&self, user_id: i64, image_id: i64) -> DomainResult<()> {
        self.public_image(image_id).await?;
        self.repository.add_favorite(user_id, image_id).await
    }

    pub async fn remove_favorite(&self, user_id: i64, image_id: i64) -> DomainResult<()> {
        self.public_image(image_id).await?;
        self.repository.remove_favorite(user_id, image_id).await
    }

    async fn set_visibility(
        &self,
        user_id: i64,
        image_id: i64,
        is_private: bool,
    ) -> DomainResult<()> {
        let image = self
            .repository
            .find_by_id(image_id)
            .await?
            .filter(|image| image.user_id == user_id)
            .ok_or(ImageError::ImageNotFound)?;

        if image.is_private != is_private {
            self.repository.set_private(image_id, is_private).await?;
        }
        Ok(())
    }

    /// Make an owned image public
    pub async fn publish(&self, user_id: i64, image_id: i64) -> DomainResult<()> {
        self.set_visibility(user_id, image_id, false).await
    }

    /// Make an owned image private
    pub async fn unpublish(&self, user_id: i64, image_id: i64) -> DomainResult<()> {
        self.set_visibility(user_id, image_id, true).await
    }
}
