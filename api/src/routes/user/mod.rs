//! User account route handlers

pub mod password;
pub mod profile;
pub mod verification;

pub use password::{password_reset_mail, reset_password};
pub use profile::{get_images, get_user_details};
pub use verification::{new_verification_token, verify_account};
