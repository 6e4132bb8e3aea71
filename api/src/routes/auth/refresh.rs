use actix_web::{web, HttpRequest, HttpResponse};

use craiyon_core::{AuthError, ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::handle_refresh_error;
use crate::middleware::extract_bearer_token;

/// Handler for POST /api/v1/auth/refresh-token
///
/// The refresh token is sent as `Authorization: Bearer <token>`.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "data": { "accessToken": "eyJ...", "refreshToken": "eyJ..." } }
/// ```
///
/// ## Errors
/// - 403 Forbidden: missing, invalid, rotated-out or revoked refresh token
pub async fn refresh_token<U, T, I>(
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

    match state.auth_service.refresh(&token).await {
        Ok(tokens) => HttpResponse::Ok().json(ApiResponse::success(tokens)),
        Err(error) => handle_refresh_error(error),
    }
}
