use actix_web::{http::header::ContentType, web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::image::PublicImagesQuery;
use crate::handlers::handle_domain_error;
use crate::middleware::OptionalAuth;

/// Handler for GET /api/v1/image/public?page=&limit=&sort=like|created&order=asc|desc
///
/// When the caller is signed in each image carries `likedByUser`.
pub async fn list_public<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: OptionalAuth,
    query: web::Query<PublicImagesQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state
        .image_service
        .list_public_images(auth.user_id(), query.into_inner().into())
        .await
    {
        Ok(images) => HttpResponse::Ok().json(ApiResponse::success(images)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/image/{id}
///
/// Sends the PNG file of a public image, or of a private image to its owner.
pub async fn get_image<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: OptionalAuth,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state
        .image_service
        .load_image(auth.user_id(), path.into_inner())
        .await
    {
        Ok((_, bytes)) => HttpResponse::Ok()
            .content_type(ContentType::png())
            .body(bytes),
        Err(error) => handle_domain_error(error),
    }
}
