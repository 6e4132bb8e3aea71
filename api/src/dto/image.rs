use serde::{Deserialize, Serialize};
use validator::Validate;

use craiyon_core::{GeneratorModel, PublicImageQuery, Resolution, SortBy, SortOrder};

use super::user::PageQuery;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateImageRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Prompt is missing, cannot generate image without prompt"
    ))]
    pub prompt: String,
    #[serde(default)]
    pub model: GeneratorModel,
    #[serde(default)]
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub image_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub is_favorite: bool,
}

/// `?page=&limit=&sort=&order=` on the public gallery
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PublicImagesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<SortBy>,
    pub order: Option<SortOrder>,
}

impl From<PublicImagesQuery> for PublicImageQuery {
    fn from(query: PublicImagesQuery) -> Self {
        PublicImageQuery {
            pagination: PageQuery {
                page: query.page,
                limit: query.limit,
            }
            .into(),
            sort: query.sort.unwrap_or_default(),
            order: query.order.unwrap_or_default(),
        }
    }
}
