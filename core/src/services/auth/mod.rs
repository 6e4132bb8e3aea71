//! Authentication service module
//!
//! Session lifecycle on top of the token and user services:
//! - Registration and login, each starting a new token family
//! - Refresh with rotation inside the presented token's family
//! - Logout, ending one family

mod service;


pub use service::AuthService;
