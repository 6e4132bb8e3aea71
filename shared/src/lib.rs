//! Shared utilities and common types for the Craiyon server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The API response envelope and pagination parameters
//! - Input validation helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, ImageConfig, ServerConfig,
};
pub use types::{ApiResponse, HealthResponse, Pagination};
pub use utils::validation;
