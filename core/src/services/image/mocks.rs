//! Test doubles for image generation and storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::image::Resolution;

use super::traits::{ImageGenerator, ImageStorage};

/// Returns the prompt and resolution as the "image" bytes
#[derive(Debug, Clone, Default)]
pub struct MockImageGenerator {
    pub should_fail: bool,
}

impl MockImageGenerator {
    pub fn new(should_fail: bool) -> Self {
        Self { should_fail }
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str, resolution: Resolution) -> Result<Vec<u8>, String> {
        if self.should_fail {
            return Err("Provider unavailable".to_string());
        }
        Ok(format!("{}@{}", prompt, resolution.as_str()).into_bytes())
    }
}

/// In-memory file storage
#[derive(Debug, Clone, Default)]
pub struct MockImageStorage {
    pub files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    saved: Arc<AtomicUsize>,
}

impl MockImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStorage for MockImageStorage {
    async fn save(&self, bytes: &[u8]) -> Result<String, String> {
        let location = format!("image-{}.png", self.saved.fetch_add(1, Ordering::SeqCst) + 1);
        self.files
            .lock()
            .unwrap()
            .insert(location.clone(), bytes.to_vec());
        Ok(location)
    }

    async fn load(&self, location: &str) -> Result<Vec<u8>, String> {
        self.files
            .lock()
            .unwrap()
            .get(location)
            .cloned()
            .ok_or_else(|| format!("No such file: {}", location))
    }

    async fn delete(&self, location: &str) -> Result<(), String> {
        self.files
            .lock()
            .unwrap()
            .remove(location)
            .map(|_| ())
            .ok_or_else(|| format!("No such file: {}", location))
    }
}
