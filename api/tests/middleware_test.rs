//! Integration tests for token extraction and the shared error envelope

mod common;

use actix_web::test;
use chrono::Duration;
use serde_json::Value;

use craiyon_api::create_app;

use common::{bearer, generate_image, register, TestContext};

#[actix_web::test]
async fn test_missing_token_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No token provided");
}

#[actix_web::test]
async fn test_malformed_authorization_headers() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for header in ["Bearer", "Bearer ", "Basic abc", "token"] {
        let req = test::TestRequest::get()
            .uri("/api/v1/user")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "{}", header);
    }
}

#[actix_web::test]
async fn test_invalid_and_expired_access_tokens() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let session = register(&app, "Ada", "ada@example.com").await;

    // a refresh token is not an access token
    let req = test::TestRequest::get()
        .uri("/api/v1/user")
        .insert_header(bearer(session["refreshToken"].as_str().unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid token provided");

    let access = session["accessToken"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri("/api/v1/user")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    ctx.clock.advance(Duration::minutes(61));

    let req = test::TestRequest::get()
        .uri("/api/v1/user")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_optional_auth_treats_bad_token_as_anonymous() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let session = register(&app, "Ada", "ada@example.com").await;
    let owner = session["accessToken"].as_str().unwrap().to_string();
    let id = generate_image(&app, &owner, "a red fox").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/image/public")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // a garbage token does not grant the owner's view of a private image
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/image/{}", id))
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], "v1");
}

#[actix_web::test]
async fn test_unknown_route_uses_error_envelope() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}
