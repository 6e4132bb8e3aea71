//! Error types for authentication and image operations
//!
//! Display strings are the messages clients receive, so they stay stable.

use thiserror::Error;

/// Authentication and session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token provided")]
    InvalidToken,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,
}

/// Image catalogue errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Requested image does not exist or you do not have permission to view it")]
    ImageNotFound,

    #[error("Image is already in favorites")]
    AlreadyFavorite,

    #[error("Image is not in favorites")]
    NotFavorite,

    #[error("Image generation failed: {message}")]
    GenerationFailed { message: String },
}
