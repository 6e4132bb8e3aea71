//! Generated image metadata.

use chrono::{DateTime, Utc};
use craiyon_shared::Pagination;
use serde::{Deserialize, Serialize};

/// Image generation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GeneratorModel {
    #[default]
    #[serde(rename = "DALLE")]
    Dalle,
}

impl GeneratorModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorModel::Dalle => "DALLE",
        }
    }
}

impl std::str::FromStr for GeneratorModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DALLE" => Ok(GeneratorModel::Dalle),
            other => Err(format!("Invalid model: {}", other)),
        }
    }
}

/// Output resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    #[serde(rename = "256x256")]
    Res256,
    #[serde(rename = "512x512")]
    Res512,
    #[serde(rename = "1024x1024")]
    Res1024,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Res256 => "256x256",
            Resolution::Res512 => "512x512",
            Resolution::Res1024 => "1024x1024",
        }
    }
}

impl std::str::FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "256x256" => Ok(Resolution::Res256),
            "512x512" => Ok(Resolution::Res512),
            "1024x1024" => Ok(Resolution::Res1024),
            other => Err(format!("Invalid resolution: {}", other)),
        }
    }
}

/// Sort key for the public gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Like,
    #[default]
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Stored image row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub id: i64,
    pub user_id: i64,
    pub prompt: String,
    pub model: GeneratorModel,
    pub resolution: Resolution,

    /// Storage-relative location of the image file
    pub url: String,

    pub is_private: bool,
    pub likes: i64,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedImage {
    /// Whether `viewer` may see this image
    pub fn is_visible_to(&self, viewer: Option<i64>) -> bool {
        !self.is_private || viewer == Some(self.user_id)
    }
}

/// Data needed to insert an image; new images start private with no likes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub user_id: i64,
    pub prompt: String,
    pub model: GeneratorModel,
    pub resolution: Resolution,
    pub url: String,
}

/// Public image together with the viewer's favorite flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicImage {
    pub image: GeneratedImage,
    pub liked_by_user: bool,
}

/// Query for the public gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublicImageQuery {
    pub pagination: Pagination,
    pub sort: SortBy,
    pub order: SortOrder,
}

/// Image as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: i64,
    pub prompt: String,
    pub url: String,
    pub is_private: bool,
    pub likes: i64,
    pub model: GeneratorModel,
    pub resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_user: Option<bool>,
}

impl From<GeneratedImage> for ImageView {
    fn from(image: GeneratedImage) -> Self {
        Self {
            id: image.id,
            prompt: image.prompt,
            url: image.url,
            is_private: image.is_private,
            likes: image.likes,
            model: image.model,
            resolution: image.resolution,
            liked_by_user: None,
        }
    }
}

impl From<PublicImage> for ImageView {
    fn from(public: PublicImage) -> Self {
        let liked = public.liked_by_user;
        Self {
            liked_by_user: Some(liked),
            ..ImageView::from(public.image)
        }
    }
}
