//! Mail sender that records outgoing mail in the log.
//!
//! Delivery over SMTP is left to the deployment; this sender keeps the
//! account verification and password reset links visible in development.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use craiyon_core::services::{Mail, MailSender};

/// Logs each mail instead of delivering it
#[derive(Debug, Clone)]
pub struct LoggingMailSender {
    from: String,
    sent_count: Arc<AtomicU64>,
    simulate_failure: bool,
}

impl LoggingMailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            sent_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// Number of mails accepted so far
    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

#[async_trait]
impl MailSender for LoggingMailSender {
    async fn send(&self, mail: Mail) -> Result<(), String> {
        if self.simulate_failure {
            warn!(target: "mail", to = %mail.to, "Simulating mail delivery failure");
            return Err("Simulated mail delivery failure".to_string());
        }

        let count = self.sent_count.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            target: "mail",
            from = %self.from,
            to = %mail.to,
            subject = %mail.subject,
            count,
            body = %mail.html,
            "Mail queued"
        );
        Ok(())
    }
}
