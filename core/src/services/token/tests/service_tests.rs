//! Unit tests for token service

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use crate::clock::MockClock;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

const ACCESS_SECRET: &str = "test-access-secret";
const REFRESH_SECRET: &str = "test-refresh-secret";

fn config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_token_secret: ACCESS_SECRET.to_string(),
        refresh_token_secret: REFRESH_SECRET.to_string(),
        access_token_expiry_minutes: 60,
        refresh_token_expiry_days: 7,
    }
}

fn setup() -> (
    TokenService<MockTokenRepository>,
    MockTokenRepository,
    Arc<MockClock>,
) {
    let repository = MockTokenRepository::new();
    let clock = Arc::new(MockClock::new(Utc::now()));
    let service = TokenService::new(Arc::new(repository.clone()), clock.clone(), config())
        .expect("valid config");
    (service, repository, clock)
}

fn sign(payload: serde_json::Value, secret: &str) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn assert_auth_error<T: std::fmt::Debug>(result: Result<T, DomainError>, expected: AuthError) {
    match result {
        Err(DomainError::Auth(actual)) => assert_eq!(actual, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

#[test]
fn test_rejects_shared_secret() {
    let mut config = config();
    config.refresh_token_secret = ACCESS_SECRET.to_string();

    let result = TokenService::new(
        Arc::new(MockTokenRepository::new()),
        Arc::new(MockClock::default()),
        config,
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn test_access_token_round_trip() {
    let (service, _, _) = setup();

    for user_id in [1_i64, 42, i64::MAX] {
        let token = service.create_access_token(user_id).unwrap();
        assert_eq!(service.verify_access_token(&token).unwrap(), user_id);
    }
}

#[tokio::test]
async fn test_access_token_expires_after_one_hour() {
    let (service, _, clock) = setup();
    let token = service.create_access_token(5).unwrap();

    clock.advance(Duration::minutes(59));
    assert!(service.verify_access_token(&token).is_ok());

    clock.advance(Duration::minutes(1));
    assert_auth_error(service.verify_access_token(&token), AuthError::InvalidToken);
}

#[tokio::test]
async fn test_wrong_secret_is_invalid_token() {
    let (service, _, _) = setup();

    let forged_access = sign(
        json!({"userId": 1, "exp": Utc::now().timestamp() + 600}),
        "some-other-secret",
    );
    assert_auth_error(service.verify_access_token(&forged_access), AuthError::InvalidToken);

    let forged_refresh = sign(
        json!({"userId": 1, "tokenId": "t", "familyId": "f"}),
        "some-other-secret",
    );
    assert_auth_error(
        service.verify_refresh_token(&forged_refresh).await,
        AuthError::InvalidToken,
    );
}

#[tokio::test]
async fn test_token_classes_do_not_cross_verify() {
    let (service, _, _) = setup();

    let access = service.create_access_token(1).unwrap();
    let refresh = service.create_refresh_token(1, None).await.unwrap();

    assert_auth_error(service.verify_refresh_token(&access).await, AuthError::InvalidToken);
    assert_auth_error(service.verify_access_token(&refresh), AuthError::InvalidToken);
}

#[tokio::test]
async fn test_malformed_token_is_invalid() {
    let (service, _, _) = setup();
    assert_auth_error(service.verify_access_token("not-a-jwt"), AuthError::InvalidToken);
    assert_auth_error(
        service.verify_refresh_token("not.a.jwt").await,
        AuthError::InvalidToken,
    );
}

#[tokio::test]
async fn test_access_token_user_id_claims() {
    let (service, _, _) = setup();
    let exp = Utc::now().timestamp() + 600;

    let missing = sign(json!({"exp": exp}), ACCESS_SECRET);
    assert_auth_error(service.verify_access_token(&missing), AuthError::InvalidToken);

    let not_integer = sign(json!({"userId": "abc", "exp": exp}), ACCESS_SECRET);
    assert_auth_error(service.verify_access_token(&not_integer), AuthError::UserNotFound);

    let numeric_string = sign(json!({"userId": "17", "exp": exp}), ACCESS_SECRET);
    assert_eq!(service.verify_access_token(&numeric_string).unwrap(), 17);
}

#[tokio::test]
async fn test_fresh_refresh_token_verifies_to_issued_triple() {
    let (service, repository, _) = setup();

    let token = service.create_refresh_token(9, None).await.unwrap();
    let verified = service.verify_refresh_token(&token).await.unwrap();

    let stored = repository
        .find_family(&verified.family_id)
        .await
        .unwrap()
        .expect("family stored");
    assert_eq!(verified.user_id, 9);
    assert_eq!(verified.token_id, stored.token_id);
    assert_eq!(stored.user_id, 9);

    // Verification does not mutate storage
    let again = service.verify_refresh_token(&token).await.unwrap();
    assert_eq!(again, verified);
}

#[tokio::test]
async fn test_rotation_kills_old_token() {
    let (service, repository, _) = setup();

    let t1 = service.create_refresh_token(3, None).await.unwrap();
    let family = service.verify_refresh_token(&t1).await.unwrap().family_id;
    let t2 = service.create_refresh_token(3, Some(&family)).await.unwrap();

    assert_eq!(repository.len().await, 1);

    let verified = service.verify_refresh_token(&t2).await.unwrap();
    assert_eq!(verified.family_id, family);

    assert_auth_error(service.verify_refresh_token(&t1).await, AuthError::InvalidToken);
}

#[tokio::test]
async fn test_replay_revokes_whole_family() {
    let (service, repository, _) = setup();

    let t1 = service.create_refresh_token(3, None).await.unwrap();
    let family = service.verify_refresh_token(&t1).await.unwrap().family_id;
    let t2 = service.create_refresh_token(3, Some(&family)).await.unwrap();

    // Replaying the rotated-out token
    assert_auth_error(service.verify_refresh_token(&t1).await, AuthError::InvalidToken);
    assert!(!repository.contains_family(&family).await);

    // The legitimate successor is dead as well
    assert_auth_error(service.verify_refresh_token(&t2).await, AuthError::InvalidToken);
}

#[tokio::test]
async fn test_mismatched_user_in_family_is_replay() {
    let (service, repository, _) = setup();

    let token = service.create_refresh_token(3, None).await.unwrap();
    let verified = service.verify_refresh_token(&token).await.unwrap();

    let tampered = sign(
        json!({
            "userId": 4,
            "tokenId": verified.token_id,
            "familyId": verified.family_id,
        }),
        REFRESH_SECRET,
    );
    assert_auth_error(service.verify_refresh_token(&tampered).await, AuthError::InvalidToken);
    assert!(!repository.contains_family(&verified.family_id).await);
}

#[tokio::test]
async fn test_expired_family_is_deleted() {
    let (service, repository, clock) = setup();

    let token = service.create_refresh_token(3, None).await.unwrap();
    let family = service.verify_refresh_token(&token).await.unwrap().family_id;

    clock.advance(Duration::days(7));
    assert_auth_error(service.verify_refresh_token(&token).await, AuthError::InvalidToken);
    assert!(!repository.contains_family(&family).await);

    // Still rejected once the clock is turned back: the row is gone
    clock.advance(Duration::days(-7));
    assert_auth_error(service.verify_refresh_token(&token).await, AuthError::InvalidToken);
}

#[tokio::test]
async fn test_rotation_resets_expiry() {
    let (service, _, clock) = setup();

    let t1 = service.create_refresh_token(3, None).await.unwrap();
    let verified = service.verify_refresh_token(&t1).await.unwrap();

    clock.advance(Duration::days(6));
    let pair = service.rotate(&verified).await.unwrap();

    clock.advance(Duration::days(6));
    assert!(service.verify_refresh_token(&pair.refresh_token).await.is_ok());
    assert!(service.verify_access_token(&pair.access_token).is_err());
}

#[tokio::test]
async fn test_missing_refresh_claims_always_invalid_token() {
    let (service, _, _) = setup();

    let payloads = [
        json!({"tokenId": "t", "userId": 1}),
        json!({"familyId": "f", "userId": 1}),
        json!({"familyId": "f", "tokenId": "t"}),
        json!({"familyId": "f", "userId": "abc"}),
        json!({"tokenId": "t", "userId": "abc"}),
        json!({}),
    ];

    for payload in payloads {
        let token = sign(payload.clone(), REFRESH_SECRET);
        match service.verify_refresh_token(&token).await {
            Err(DomainError::Auth(AuthError::InvalidToken)) => {}
            other => panic!("payload {} gave {:?}", payload, other),
        }
    }
}

#[tokio::test]
async fn test_non_integer_refresh_user_id_is_user_not_found() {
    let (service, _, _) = setup();

    let token = sign(
        json!({"familyId": "f", "tokenId": "t", "userId": "abc"}),
        REFRESH_SECRET,
    );
    assert_auth_error(service.verify_refresh_token(&token).await, AuthError::UserNotFound);
}

#[tokio::test]
async fn test_unknown_family_is_invalid_token() {
    let (service, _, _) = setup();

    let token = sign(
        json!({"familyId": "never-issued", "tokenId": "t", "userId": 1}),
        REFRESH_SECRET,
    );
    assert_auth_error(service.verify_refresh_token(&token).await, AuthError::InvalidToken);
}

#[tokio::test]
async fn test_independent_families_per_login() {
    let (service, repository, _) = setup();

    let first = service.issue_pair(8).await.unwrap();
    let second = service.issue_pair(8).await.unwrap();

    let a = service.verify_refresh_token(&first.refresh_token).await.unwrap();
    let b = service.verify_refresh_token(&second.refresh_token).await.unwrap();
    assert_ne!(a.family_id, b.family_id);
    assert_eq!(repository.len().await, 2);

    assert!(service.revoke_family(&a.family_id).await.unwrap());
    assert!(service.verify_refresh_token(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_user_sessions() {
    let (service, _, _) = setup();

    let mine = service.issue_pair(1).await.unwrap();
    let also_mine = service.issue_pair(1).await.unwrap();
    let theirs = service.issue_pair(2).await.unwrap();

    assert_eq!(service.revoke_user_sessions(1).await.unwrap(), 2);
    assert!(service.verify_refresh_token(&mine.refresh_token).await.is_err());
    assert!(service.verify_refresh_token(&also_mine.refresh_token).await.is_err());
    assert!(service.verify_refresh_token(&theirs.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_rotate_does_not_revive_revoked_family() {
    let (service, repository, _) = setup();

    let t1 = service.create_refresh_token(7, None).await.unwrap();
    let verified = service.verify_refresh_token(&t1).await.unwrap();

    // Sessions end between verification and rotation
    assert_eq!(service.revoke_user_sessions(7).await.unwrap(), 1);
    assert!(repository.is_empty().await);

    assert_auth_error(service.rotate(&verified).await, AuthError::InvalidToken);
    assert!(!repository.contains_family(&verified.family_id).await);
}

#[tokio::test]
async fn test_rotate_twice_with_same_verification_fails() {
    let (service, repository, _) = setup();

    let t1 = service.create_refresh_token(7, None).await.unwrap();
    let verified = service.verify_refresh_token(&t1).await.unwrap();

    let pair = service.rotate(&verified).await.unwrap();
    assert_auth_error(service.rotate(&verified).await, AuthError::InvalidToken);

    // The winner's token is untouched
    assert_eq!(repository.len().await, 1);
    assert!(service.verify_refresh_token(&pair.refresh_token).await.is_ok());
}
