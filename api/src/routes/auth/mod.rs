//! Authentication route handlers
//!
//! - Registration and login, each starting a new session
//! - Refresh token rotation
//! - Logout, ending the session of the presented refresh token

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh_token;
pub use register::register;
