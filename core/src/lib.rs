//! # Craiyon Core
//!
//! Core business logic and domain layer for the Craiyon backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, SystemClock};
pub use domain::entities::{
    GeneratedImage, GeneratorModel, ImageView, PublicImageQuery, Resolution, Role, SortBy,
    SortOrder, User, UserProfile,
};
pub use domain::value_objects::{AuthResponse, TokenPair};
pub use errors::{AuthError, DomainError, DomainResult, ImageError};
pub use repositories::{ImageRepository, TokenRepository, UserRepository};
pub use services::{
    AuthService, ImageGenerator, ImageService, ImageStorage, Mail, MailSender, PasswordHasher,
    TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig, UserService,
    UserServiceConfig,
};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::MockClock;
