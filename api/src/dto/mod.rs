//! Request and response bodies

pub mod auth;
pub mod image;
pub mod user;

use actix_web::HttpResponse;
use validator::Validate;

use crate::handlers::error::validation_error;

/// Run `validator` rules on a request body
pub fn validate_request<T: Validate>(request: &T) -> Result<(), HttpResponse> {
    request.validate().map_err(|errors| validation_error(&errors))
}

/// Plain confirmation body
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
