//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management and migrations
//! - Repository implementations for users, refresh token families and images

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlImageRepository, MySqlTokenRepository, MySqlUserRepository};
