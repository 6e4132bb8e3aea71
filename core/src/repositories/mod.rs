pub mod image;
pub mod token;
pub mod user;

pub use image::ImageRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use image::MockImageRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user::MockUserRepository;
