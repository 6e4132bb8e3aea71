//! Business services containing domain logic and use cases.

pub mod auth;
pub mod image;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::AuthService;
pub use image::{ImageGenerator, ImageService, ImageStorage};
pub use token::{
    CleanupResult, TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};
pub use user::{Mail, MailSender, PasswordHasher, UserService, UserServiceConfig};
