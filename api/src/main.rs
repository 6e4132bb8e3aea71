use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use log::{error, info};

use craiyon_api::{create_app, AppState};
use craiyon_core::{
    AuthService, Clock, ImageService, SystemClock, TokenCleanupConfig, TokenCleanupService,
    TokenService, TokenServiceConfig, UserService, UserServiceConfig,
};
use craiyon_shared::AppConfig;

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    error!("Startup failed: {}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting Craiyon API Server");
    config.validate().map_err(startup_error)?;
    if config.auth.is_using_default_secrets() {
        log::warn!(
            "Using development token secrets, set ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET"
        );
    }

    let infra = craiyon_infra::initialize(&config)
        .await
        .map_err(startup_error)?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_service = Arc::new(
        TokenService::new(
            infra.token_repository.clone(),
            clock.clone(),
            TokenServiceConfig::from(&config.auth),
        )
        .map_err(startup_error)?,
    );
    let user_service = Arc::new(UserService::new(
        infra.user_repository.clone(),
        token_service.clone(),
        infra.password_hasher.clone(),
        infra.mail_sender.clone(),
        clock,
        UserServiceConfig::from(&config),
    ));
    let auth_service = Arc::new(AuthService::new(user_service.clone(), token_service.clone()));
    let image_service = Arc::new(ImageService::new(
        infra.image_repository.clone(),
        infra.image_generator.clone(),
        infra.image_storage.clone(),
    ));

    Arc::new(TokenCleanupService::new(
        token_service.clone(),
        TokenCleanupConfig::default(),
    ))
    .start_background_task();

    let app_state = web::Data::new(AppState {
        auth_service,
        user_service,
        token_service,
        image_service,
        environment: config.environment,
        domain: config.domain.clone(),
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server = HttpServer::new(move || create_app(app_state.clone()));
    let server = if config.server.workers > 0 {
        server.workers(config.server.workers)
    } else {
        server
    };

    let result = server.bind(&bind_address)?.run().await;
    infra.pool.close().await;
    result
}
