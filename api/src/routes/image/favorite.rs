use actix_web::{web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::image::FavoriteResponse;
use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/image/{id}/favorite
pub async fn is_favorite<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state
        .image_service
        .is_favorite(auth.user_id, path.into_inner())
        .await
    {
        Ok(is_favorite) => {
            HttpResponse::Ok().json(ApiResponse::success(FavoriteResponse { is_favorite }))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/image/{id}/favorite
///
/// ## Errors
/// - 404 Not Found: the image does not exist or is private
/// - 409 Conflict: already a favorite
pub async fn add_favorite<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state
        .image_service
        .add_favorite(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Added to favorites",
        ))),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/image/{id}/favorite
pub async fn remove_favorite<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state
        .image_service
        .remove_favorite(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Removed from favorites",
        ))),
        Err(error) => handle_domain_error(error),
    }
}
