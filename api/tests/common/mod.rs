//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test, web,
};
use chrono::Utc;
use serde_json::{json, Value};

use craiyon_api::{create_app, AppState};
use craiyon_core::repositories::{MockImageRepository, MockTokenRepository, MockUserRepository};
use craiyon_core::services::image::mocks::{MockImageGenerator, MockImageStorage};
use craiyon_core::services::user::mocks::{MockMailSender, MockPasswordHasher};
use craiyon_core::{
    AuthService, Clock, ImageService, MockClock, TokenService, TokenServiceConfig, UserService,
    UserServiceConfig,
};
use craiyon_shared::Environment;

pub type TestState = AppState<MockUserRepository, MockTokenRepository, MockImageRepository>;

/// Application state wired to in-memory doubles, with handles to inspect them
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub clock: Arc<MockClock>,
    pub mailer: Arc<MockMailSender>,
    pub tokens: Arc<MockTokenRepository>,
    pub images: Arc<MockImageRepository>,
    pub storage: Arc<MockImageStorage>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Context whose image provider always fails
    pub fn with_failing_generator() -> Self {
        Self::build(true)
    }

    fn build(generator_fails: bool) -> Self {
        let clock = Arc::new(MockClock::new(Utc::now()));
        let mailer = Arc::new(MockMailSender::new(false));
        let users = Arc::new(MockUserRepository::new());
        let tokens = Arc::new(MockTokenRepository::new());
        let images = Arc::new(MockImageRepository::new());
        let storage = Arc::new(MockImageStorage::new());

        let token_service = Arc::new(
            TokenService::new(
                tokens.clone(),
                clock.clone() as Arc<dyn Clock>,
                TokenServiceConfig::default(),
            )
            .expect("default token config is valid"),
        );
        let user_service = Arc::new(UserService::new(
            users,
            token_service.clone(),
            Arc::new(MockPasswordHasher),
            mailer.clone(),
            clock.clone(),
            UserServiceConfig::default(),
        ));
        let auth_service = Arc::new(AuthService::new(
            user_service.clone(),
            token_service.clone(),
        ));
        let image_service = Arc::new(ImageService::new(
            images.clone(),
            Arc::new(MockImageGenerator::new(generator_fails)),
            storage.clone(),
        ));

        let state = web::Data::new(AppState {
            auth_service,
            user_service,
            token_service,
            image_service,
            environment: Environment::Development,
            domain: "http://localhost:4000".to_string(),
        });

        Self {
            state,
            clock,
            mailer,
            tokens,
            images,
            storage,
        }
    }

    /// Token embedded in the link of the last mail
    pub fn last_mailed_token(&self) -> String {
        let mail = self.mailer.last_mail().expect("a mail was sent");
        token_from_link(&mail.html)
    }
}

/// Last path segment of the first link in an HTML mail
pub fn token_from_link(html: &str) -> String {
    let start = html.find("href='").expect("mail contains a link") + "href='".len();
    let url = &html[start..];
    let url = &url[..url.find('\'').expect("link is closed")];
    url.rsplit('/').next().expect("link has a path").to_string()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Registers an account and returns the `data` of the response
pub async fn register<S, B>(app: &S, name: &str, email: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "name": name, "email": email, "password": "password123" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    body["data"].clone()
}

/// Generates an image as the owner of `access_token` and returns its id
pub async fn generate_image<S, B>(app: &S, access_token: &str, prompt: &str) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/image/generate")
        .insert_header(bearer(access_token))
        .set_json(json!({ "prompt": prompt }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    body["data"]["imageId"].as_i64().expect("image id")
}
