use actix_web::{web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::user::PageQuery;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/user
pub async fn get_user_details<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state.user_service.get_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(user)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/user/generated-images?page=&limit=
///
/// Lists the caller's own images, private ones included, newest first.
pub async fn get_images<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state
        .image_service
        .list_user_images(auth.user_id, query.into_inner().into())
        .await
    {
        Ok(images) => HttpResponse::Ok().json(ApiResponse::success(images)),
        Err(error) => handle_domain_error(error),
    }
}
