//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `craiyon_core`:
//!
//! - **Database**: MySQL repositories for users, refresh token families and images
//! - **Security**: bcrypt password hashing
//! - **Images**: OpenAI-compatible image provider and file storage
//! - **Mail**: outbound mail sender
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use std::sync::Arc;

use craiyon_shared::AppConfig;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Image provider and image file storage
pub mod images;

/// Outbound mail
pub mod mail;

/// Password hashing
pub mod security;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlImageRepository, MySqlTokenRepository, MySqlUserRepository,
};
pub use images::{FileImageStorage, OpenAiImageGenerator};
pub use mail::LoggingMailSender;
pub use security::BcryptPasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

/// Infrastructure service container
///
/// Owns the connection pool and every adapter the API layer wires into the
/// core services.
#[cfg(feature = "mysql")]
#[derive(Clone)]
pub struct InfrastructureServices {
    pub pool: DatabasePool,
    pub user_repository: Arc<MySqlUserRepository>,
    pub token_repository: Arc<MySqlTokenRepository>,
    pub image_repository: Arc<MySqlImageRepository>,
    pub password_hasher: Arc<BcryptPasswordHasher>,
    pub mail_sender: Arc<LoggingMailSender>,
    pub image_generator: Arc<OpenAiImageGenerator>,
    pub image_storage: Arc<FileImageStorage>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The database connection pool, running pending migrations
/// - The image provider client and the image directory
/// - Password hashing and mail delivery
#[cfg(feature = "mysql")]
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let pool = DatabasePool::new(config.database.clone()).await?;
    pool.run_migrations().await?;

    let image_storage = FileImageStorage::new(&config.image.storage_dir);
    image_storage.ensure_dir().await?;

    let image_generator = OpenAiImageGenerator::new(&config.image)?;
    if !image_generator.is_configured() {
        tracing::warn!("OPENAI_API_KEY is not set, image generation requests will fail");
    }

    let sql_pool = pool.get_pool().clone();
    let services = InfrastructureServices {
        user_repository: Arc::new(MySqlUserRepository::new(sql_pool.clone())),
        token_repository: Arc::new(MySqlTokenRepository::new(sql_pool.clone())),
        image_repository: Arc::new(MySqlImageRepository::new(sql_pool)),
        password_hasher: Arc::new(BcryptPasswordHasher::default()),
        mail_sender: Arc::new(LoggingMailSender::new(mail::sender_address())),
        image_generator: Arc::new(image_generator),
        image_storage: Arc::new(image_storage),
        pool,
    };

    tracing::info!("Infrastructure services initialized successfully");
    Ok(services)
}
