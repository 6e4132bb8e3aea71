//! Input validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check that an email address is syntactically plausible
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Normalize an email for lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check that a password satisfies the length policy
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}
