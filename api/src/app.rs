//! Application state and factory
//!
//! This module holds the shared application state and builds the Actix-web
//! application with every route, middleware and extractor configuration.

use std::sync::Arc;

use actix_web::{
    error::InternalError, http::StatusCode, middleware::Logger, web, App, HttpResponse,
};

use craiyon_core::{
    AuthService, ImageRepository, ImageService, TokenRepository, TokenService, UserRepository,
    UserService,
};
use craiyon_shared::Environment;

use crate::handlers::error::error_response;
use crate::middleware::{create_cors, AccessTokenVerifier, JwtAuth};
use crate::routes::{auth, health, image, user};

/// Services shared by every request handler
pub struct AppState<U, T, I>
where
    U: UserRepository,
    T: TokenRepository,
    I: ImageRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
    pub user_service: Arc<UserService<U, T>>,
    pub token_service: Arc<TokenService<T>>,
    pub image_service: Arc<ImageService<I>>,
    pub environment: Environment,
    /// Public base URL of the frontend
    pub domain: String,
}

fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let message = err.to_string();
    InternalError::from_response(err, error_response(StatusCode::BAD_REQUEST, message)).into()
}

/// Create and configure the application with all dependencies
pub fn create_app<U, T, I>(
    app_state: web::Data<AppState<U, T, I>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.token_service.clone();
    let cors = create_cors(app_state.environment, &app_state.domain);

    App::new()
        .app_data(app_state)
        .app_data(web::Data::from(verifier))
        // Malformed bodies, queries and paths use the same error envelope
        .app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err)))
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .route("", web::get().to(health::api_version))
                .route("/", web::get().to(health::api_version))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::<U, T, I>))
                        .route("/login", web::post().to(auth::login::<U, T, I>))
                        .route("/refresh-token", web::post().to(auth::refresh_token::<U, T, I>))
                        .route("/logout", web::post().to(auth::logout::<U, T, I>)),
                )
                .service(
                    web::scope("/user")
                        .route(
                            "",
                            web::get()
                                .to(user::get_user_details::<U, T, I>)
                                .wrap(JwtAuth::required()),
                        )
                        .route(
                            "/generated-images",
                            web::get()
                                .to(user::get_images::<U, T, I>)
                                .wrap(JwtAuth::required()),
                        )
                        .route(
                            "/new-verification-token",
                            web::patch()
                                .to(user::new_verification_token::<U, T, I>)
                                .wrap(JwtAuth::required()),
                        )
                        .route(
                            "/verify/{user}/{token}",
                            web::get().to(user::verify_account::<U, T, I>),
                        )
                        .route(
                            "/password-reset-mail",
                            web::post().to(user::password_reset_mail::<U, T, I>),
                        )
                        .route(
                            "/reset-password",
                            web::patch().to(user::reset_password::<U, T, I>),
                        ),
                )
                .service(
                    web::scope("/image")
                        .route(
                            "/generate",
                            web::post()
                                .to(image::generate::<U, T, I>)
                                .wrap(JwtAuth::required()),
                        )
                        .route(
                            "/public",
                            web::get()
                                .to(image::list_public::<U, T, I>)
                                .wrap(JwtAuth::optional()),
                        )
                        .route(
                            "/{id}",
                            web::get()
                                .to(image::get_image::<U, T, I>)
                                .wrap(JwtAuth::optional()),
                        )
                        .service(
                            web::resource("/{id}/favorite")
                                .wrap(JwtAuth::required())
                                .route(web::get().to(image::is_favorite::<U, T, I>))
                                .route(web::post().to(image::add_favorite::<U, T, I>))
                                .route(web::delete().to(image::remove_favorite::<U, T, I>)),
                        )
                        .route(
                            "/{id}/publish",
                            web::patch()
                                .to(image::publish::<U, T, I>)
                                .wrap(JwtAuth::required()),
                        )
                        .route(
                            "/{id}/unpublish",
                            web::patch()
                                .to(image::unpublish::<U, T, I>)
                                .wrap(JwtAuth::required()),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
