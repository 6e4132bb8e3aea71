//! MySQL repository implementations

mod image_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use image_repository_impl::MySqlImageRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use craiyon_core::errors::DomainError;
use sqlx::mysql::MySqlRow;
use sqlx::{Decode, MySql, Row, Type};

/// Wraps a SQLx error with what was being attempted
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Reads one column, mapping decode failures to an internal error
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Whether a write failed on a unique or primary key
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
