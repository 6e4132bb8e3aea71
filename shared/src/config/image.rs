//! Image generation configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the external image provider and local image storage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    /// API key for the image generation provider
    pub api_key: String,

    /// Endpoint of the image generation API
    pub api_url: String,

    /// Directory where generated images are written
    pub storage_dir: PathBuf,

    /// Provider request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: String::from("https://api.openai.com/v1/images/generations"),
            storage_dir: PathBuf::from("generated-images"),
            request_timeout: 120,
        }
    }
}

impl ImageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or(defaults.api_key),
            api_url: std::env::var("OPENAI_API_URL").unwrap_or(defaults.api_url),
            storage_dir: std::env::var("GENERATED_IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            request_timeout: super::env_or("OPENAI_REQUEST_TIMEOUT", defaults.request_timeout),
        }
    }
}
