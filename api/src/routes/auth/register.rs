use actix_web::{web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{auth::RegisterRequest, validate_request};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/v1/auth/register
///
/// Creates the account, mails a verification link and returns a fresh
/// session.
///
/// ## Errors
/// - 400 Bad Request: missing or malformed name, email or password
/// - 409 Conflict: the email is already registered
pub async fn register<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.name, &request.email, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Created().json(ApiResponse::success(auth)),
        Err(error) => handle_domain_error(error),
    }
}
