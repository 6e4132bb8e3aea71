//! Traits for the image provider and image file storage

use async_trait::async_trait;

use crate::domain::entities::image::Resolution;

/// Trait for an external image generation provider
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return its encoded bytes
    async fn generate(&self, prompt: &str, resolution: Resolution) -> Result<Vec<u8>, String>;
}

/// Trait for storing generated image files
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store image bytes and return the storage-relative location
    async fn save(&self, bytes: &[u8]) -> Result<String, String>;
    /// Read back image bytes by location
    async fn load(&self, location: &str) -> Result<Vec<u8>, String>;
    /// Remove a stored file
    async fn delete(&self, location: &str) -> Result<(), String>;
}
