//! Outbound mail

mod logging_mailer;

pub use logging_mailer::LoggingMailSender;

/// `From` address for outgoing mail, built from `EMAIL_USER`
pub fn sender_address() -> String {
    let user = std::env::var("EMAIL_USER").unwrap_or_else(|_| "no-reply@craiyon.local".to_string());
    format!("Craiyon <{}>", user)
}
