use actix_web::{web, HttpResponse};

use craiyon_core::{ImageRepository, TokenRepository, UserRepository};
use craiyon_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::image::{GenerateImageRequest, GenerateImageResponse};
use crate::dto::validate_request;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/image/generate
///
/// # Request Body
///
/// ```json
/// { "prompt": "a red fox", "model": "DALLE", "resolution": "256x256" }
/// ```
///
/// `model` and `resolution` are optional. The new image is private.
///
/// ## Errors
/// - 400 Bad Request: missing prompt, unknown model or resolution
/// - 502 Bad Gateway: the image provider failed
pub async fn generate<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    auth: AuthContext,
    request: web::Json<GenerateImageRequest>,
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
        .image_service
        .generate(auth.user_id, &request.prompt, request.model, request.resolution)
        .await
    {
        Ok(image_id) => {
            HttpResponse::Created().json(ApiResponse::success(GenerateImageResponse { image_id }))
        }
        Err(error) => handle_domain_error(error),
    }
}
