//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT access token issuance and verification
//! - Refresh token families with rotation and replay detection
//! - Background cleanup of expired families

mod claims;
mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
