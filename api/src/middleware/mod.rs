pub mod auth;
pub mod cors;

pub use auth::{extract_bearer_token, AccessTokenVerifier, AuthContext, JwtAuth, OptionalAuth};
pub use cors::create_cors;
