use actix_web::{web, HttpRequest, HttpResponse};

use craiyon_core::{AuthError, ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::MessageResponse;
use crate::handlers::handle_refresh_error;
use crate::middleware::extract_bearer_token;

/// Handler for POST /api/v1/auth/logout
///
/// Deletes the refresh token family of the presented refresh token. Other
/// sessions of the same user stay valid.
pub async fn logout<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    req: HttpRequest,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    let Some(token) = extract_bearer_token(req.headers()) else {
        return handle_refresh_error(AuthError::MissingToken.into());
    };

    match state.auth_service.logout(&token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Logged out successfully",
        ))),
        Err(error) => handle_refresh_error(error),
    }
}
