//! Domain entities representing core business objects.

pub mod image;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use image::{
    GeneratedImage, GeneratorModel, ImageView, NewImage, PublicImage, PublicImageQuery,
    Resolution, SortBy, SortOrder,
};
pub use token::{
    AccessClaims, FamilyCheck, FamilyStatus, RefreshClaims, RefreshTokenFamily,
    VerifiedRefreshToken, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{NewUser, Role, User, UserProfile, VERIFICATION_TOKEN_BYTES};
