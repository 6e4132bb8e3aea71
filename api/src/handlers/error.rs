//! Mapping from domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use craiyon_core::{AuthError, DomainError, ImageError};
use craiyon_shared::ApiResponse;

const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong, please try again later";

/// Build a `{success: false, error}` response
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error(message))
}

fn auth_status(error: &AuthError) -> StatusCode {
    match error {
        AuthError::MissingToken | AuthError::InvalidToken | AuthError::InvalidCredentials => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::UserNotFound => StatusCode::NOT_FOUND,
        AuthError::UserAlreadyExists => StatusCode::CONFLICT,
    }
}

fn image_status(error: &ImageError) -> StatusCode {
    match error {
        ImageError::ImageNotFound => StatusCode::NOT_FOUND,
        ImageError::AlreadyFavorite | ImageError::NotFavorite => StatusCode::CONFLICT,
        ImageError::GenerationFailed { .. } => StatusCode::BAD_GATEWAY,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::Auth(auth) => error_response(auth_status(auth), auth.to_string()),
        DomainError::Image(ImageError::GenerationFailed { message }) => {
            log::warn!("Image generation failed: {}", message);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to generate image, please try again later",
            )
        }
        DomainError::Image(image) => error_response(image_status(image), image.to_string()),
        DomainError::Validation { message } => error_response(StatusCode::BAD_REQUEST, message),
        DomainError::NotFound { resource } => {
            error_response(StatusCode::NOT_FOUND, format!("{} not found", resource))
        }
        DomainError::Internal { .. } => {
            log::error!("Unexpected error: {}", error);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

/// Token refresh and logout failures are reported as 403 with the message
pub fn handle_refresh_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth) => error_response(StatusCode::FORBIDDEN, auth.to_string()),
        other => handle_domain_error(other),
    }
}

/// 400 response carrying the first validation message
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string());

    error_response(StatusCode::BAD_REQUEST, message)
}
