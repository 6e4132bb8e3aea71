use actix_web::{web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::user::{PasswordResetMailRequest, ResetPasswordRequest};
use crate::dto::{validate_request, MessageResponse};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/v1/user/password-reset-mail
pub async fn password_reset_mail<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    request: web::Json<PasswordResetMailRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    if let Err(response) = validate_request(&*request) {
        return response;
    }

    match state.user_service.send_password_reset(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Sent password reset mail",
        ))),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PATCH /api/v1/user/reset-password
///
/// On success every session of the user is ended.
///
/// ## Errors
/// - 400 Bad Request: malformed body or password too short
/// - 401 Unauthorized: wrong or expired reset token
/// - 404 Not Found: unknown user
pub async fn reset_password<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    request: web::Json<ResetPasswordRequest>,
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
        .user_service
        .reset_password(request.user_id, &request.token, &request.password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Password updated",
        ))),
        Err(error) => handle_domain_error(error),
    }
}
