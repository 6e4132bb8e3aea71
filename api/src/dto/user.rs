use serde::{Deserialize, Serialize};
use validator::Validate;

use craiyon_shared::Pagination;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetMailRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub user_id: i64,
    #[validate(length(min = 1, message = "Missing token"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// `?page=&limit=` on list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        let defaults = Pagination::default();
        Pagination::new(
            query.page.unwrap_or(defaults.page),
            query.limit.unwrap_or(defaults.limit),
        )
    }
}
