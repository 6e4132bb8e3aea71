use actix_web::{web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{auth::LoginRequest, validate_request};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/v1/auth/login
///
/// Every login starts an independent refresh token family.
///
/// ## Errors
/// - 400 Bad Request: missing email or password
/// - 401 Unauthorized: wrong password
/// - 404 Not Found: no account has this email
pub async fn login<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    if let Err(response) = validate_request(&*request) {
        return response;
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(ApiResponse::success(auth)),
        Err(error) => handle_domain_error(error),
    }
}
