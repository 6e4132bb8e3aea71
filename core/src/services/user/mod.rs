//! User account service module
//!
//! Credential checks, account verification and password reset.

mod config;
mod mail;
mod service;
mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;


pub use config::UserServiceConfig;
pub use mail::Mail;
pub use service::UserService;
pub use traits::{MailSender, PasswordHasher};
