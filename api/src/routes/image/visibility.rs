use actix_web::{web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for PATCH /api/v1/image/{id}/publish
///
/// Only the owner may change visibility; anyone else gets 404.
pub async fn publish<U, T, I>(
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
        .publish(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Image published",
        ))),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PATCH /api/v1/image/{id}/unpublish
pub async fn unpublish<U, T, I>(
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
        .unpublish(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Image unpublished",
        ))),
        Err(error) => handle_domain_error(error),
    }
}
