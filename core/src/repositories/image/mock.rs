//! Mock implementation of ImageRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use craiyon_shared::Pagination;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::image::{
    GeneratedImage, NewImage, PublicImage, PublicImageQuery, SortBy, SortOrder,
};
use crate::errors::{DomainError, ImageError};

use super::trait_::ImageRepository;

#[derive(Default)]
struct Store {
    images: HashMap<i64, GeneratedImage>,
    favorites: HashSet<(i64, i64)>,
    next_id: i64,
}

/// Mock image repository for testing
#[derive(Clone, Default)]
pub struct MockImageRepository {
    store: Arc<RwLock<Store>>,
    fail_creates: Arc<AtomicBool>,
}

impl MockImageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a stored image, bypassing the repository contract
    pub async fn put(&self, image: GeneratedImage) {
        let mut store = self.store.write().await;
        store.next_id = store.next_id.max(image.id);
        store.images.insert(image.id, image);
    }

    /// Make `create` fail until reset
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }
}

fn page<T>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
    items
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect()
}

#[async_trait]
impl ImageRepository for MockImageRepository {
    async fn create(&self, image: NewImage) -> Result<GeneratedImage, DomainError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Image store unavailable"));
        }
        let mut store = self.store.write().await;
        store.next_id += 1;

        let created = GeneratedImage {
            id: store.next_id,
            user_id: image.user_id,
            prompt: image.prompt,
            model: image.model,
            resolution: image.resolution,
            url: image.url,
            is_private: true,
            likes: 0,
            generated_at: Utc::now(),
        };
        store.images.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GeneratedImage>, DomainError> {
        let store = self.store.read().await;
        Ok(store.images.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<GeneratedImage>, DomainError> {
        let store = self.store.read().await;
        let mut images: Vec<_> = store
            .images
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.generated_at.cmp(&a.generated_at).then(b.id.cmp(&a.id)));
        Ok(page(images, pagination))
    }

    async fn list_public(
        &self,
        viewer: Option<i64>,
        query: PublicImageQuery,
    ) -> Result<Vec<PublicImage>, DomainError> {
        let store = self.store.read().await;
        let mut images: Vec<_> = store
            .images
            .values()
            .filter(|i| !i.is_private)
            .cloned()
            .collect();

        images.sort_by(|a, b| {
            let ordering = match query.sort {
                SortBy::Like => a.likes.cmp(&b.likes),
                SortBy::Created => a.generated_at.cmp(&b.generated_at),
            }
            .then(a.id.cmp(&b.id));
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(page(images, query.pagination)
            .into_iter()
            .map(|image| PublicImage {
                liked_by_user: viewer
                    .map(|v| store.favorites.contains(&(v, image.id)))
                    .unwrap_or(false),
                image,
            })
            .collect())
    }

    async fn is_favorite(&self, user_id: i64, image_id: i64) -> Result<bool, DomainError> {
        let store = self.store.read().await;
        Ok(store.favorites.contains(&(user_id, image_id)))
    }

    async fn add_favorite(&self, user_id: i64, image_id: i64) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        if !store.images.contains_key(&image_id) {
            return Err(ImageError::ImageNotFound.into());
        }
        if !store.favorites.insert((user_id, image_id)) {
            return Err(ImageError::AlreadyFavorite.into());
        }
        if let Some(image) = store.images.get_mut(&image_id) {
            image.likes += 1;
        }
        Ok(())
    }

    async fn remove_favorite(&self, user_id: i64, image_id: i64) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        if !store.favorites.remove(&(user_id, image_id)) {
            return Err(ImageError::NotFavorite.into());
        }
        if let Some(image) = store.images.get_mut(&image_id) {
            image.likes -= 1;
        }
        Ok(())
    }

    async fn set_private(&self, image_id: i64, is_private: bool) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        let image = store
            .images
            .get_mut(&image_id)
            .ok_or(ImageError::ImageNotFound)?;
        image.is_private = is_private;
        Ok(())
    }
}
