//! Image files on the local file system.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use craiyon_core::services::ImageStorage;

use crate::InfrastructureError;

/// Stores each image as `<uuid>.png` in a single directory
///
/// The stored location is the bare file name, so the directory can move
/// without rewriting rows.
#[derive(Debug, Clone)]
pub struct FileImageStorage {
    root: PathBuf,
}

impl FileImageStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it does not exist
    pub async fn ensure_dir(&self) -> Result<(), InfrastructureError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Resolve a stored location, refusing anything but a plain file name
    fn resolve(&self, location: &str) -> Result<PathBuf, String> {
        let is_plain_name = !location.is_empty()
            && Path::new(location).file_name().and_then(|n| n.to_str()) == Some(location)
            && location != ".."
            && location != ".";

        if is_plain_name {
            Ok(self.root.join(location))
        } else {
            Err(format!("Invalid image location: {}", location))
        }
    }
}

#[async_trait]
impl ImageStorage for FileImageStorage {
    async fn save(&self, bytes: &[u8]) -> Result<String, String> {
        self.ensure_dir().await.map_err(|e| e.to_string())?;

        let name = format!("{}.png", Uuid::new_v4());
        tokio::fs::write(self.root.join(&name), bytes)
            .await
            .map_err(|e| format!("Failed to write image {}: {}", name, e))?;

        tracing::debug!("Stored image {} ({} bytes)", name, bytes.len());
        Ok(name)
    }

    async fn load(&self, location: &str) -> Result<Vec<u8>, String> {
        let path = self.resolve(location)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| format!("Failed to read image {}: {}", location, e))
    }

    async fn delete(&self, location: &str) -> Result<(), String> {
        let path = self.resolve(location)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| format!("Failed to delete image {}: {}", location, e))?;

        tracing::debug!("Deleted image {}", location);
        Ok(())
    }
}
