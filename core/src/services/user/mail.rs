//! Outgoing account mails.

/// A rendered HTML mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl Mail {
    pub fn account_verification(to: &str, url: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Craiyon: Account verification needed".to_string(),
            html: format!(
                "<h2 align='center'>Welcome to Craiyon!</h2>\
                 <p>Thank you for registering. Please verify your account by clicking on the link below:</p>\
                 <a href='{url}'>Verify Email</a>\
                 <p>If you cannot click on the link above, paste this url in your browser: {url}</p>\
                 <p>If you did not create an account, you can safely ignore this email.</p>\
                 <p>Thank you,<br>Team Craiyon</p>"
            ),
        }
    }

    pub fn password_reset(to: &str, url: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Craiyon: Password reset".to_string(),
            html: format!(
                "<h2 align='center'>Reset your password</h2>\
                 <p>Please click on this link to reset your password:</p>\
                 <a href='{url}'>Reset Password</a>\
                 <p>If you cannot click on the link above, paste this url in your browser: {url}</p>\
                 <p>If you did not request a password reset, please ignore this email.</p>\
                 <p>Thank you,<br>Team Craiyon</p>"
            ),
        }
    }
}
