use actix_web::{http::StatusCode, web, HttpResponse};

use craiyon_core::{DomainError, ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::MessageResponse;
use crate::handlers::{error::error_response, handle_domain_error};
use crate::middleware::AuthContext;

const INVALID_LINK: &str = "Invalid link";

/// Handler for PATCH /api/v1/user/new-verification-token
///
/// Replaces the pending token and mails a new verification link.
pub async fn new_verification_token<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    match state.user_service.request_verification(auth.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Sent verification mail",
        ))),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/user/verify/{user}/{token}
///
/// Target of the link in the verification mail. An unknown user, a wrong
/// token and an expired token all answer 400 "Invalid link".
pub async fn verify_account<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    path: web::Path<(String, String)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    let (user, token) = path.into_inner();
    let Ok(user_id) = user.parse::<i64>() else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_LINK);
    };

    match state.user_service.verify_account(user_id, &token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "User verified",
        ))),
        Err(DomainError::Auth(_)) => error_response(StatusCode::BAD_REQUEST, INVALID_LINK),
        Err(error) => handle_domain_error(error),
    }
}
