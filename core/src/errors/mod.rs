//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, ImageError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// The authentication error carried by this error, if any
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            DomainError::Auth(err) => Some(err),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
