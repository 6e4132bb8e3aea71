//! Periodic removal of expired refresh token families
//!
//! Expired families are already rejected at verification time; this task only
//! keeps the table from growing without bound.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

use super::service::TokenService;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Service for cleaning up expired token families
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    token_service: Arc<TokenService<R>>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository> TokenCleanupService<R> {
    pub fn new(token_service: Arc<TokenService<R>>, config: TokenCleanupConfig) -> Self {
        Self {
            token_service,
            config,
        }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let expired_families_deleted = self.token_service.cleanup_expired().await?;
        info!(
            "Token cleanup completed - deleted {} expired families",
            expired_families_deleted
        );

        Ok(CleanupResult {
            expired_families_deleted,
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("Token cleanup cycle failed: {}", e);
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired families deleted
    pub expired_families_deleted: u64,
}
