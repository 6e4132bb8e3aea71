//! Unit tests for mock user repository implementation

use chrono::Utc;

use crate::domain::entities::user::NewUser;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ada".to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
    }
}

#[tokio::test]
async fn test_create_assigns_incrementing_ids() {
    let repo = MockUserRepository::new();

    let first = repo.create(new_user("a@example.com")).await.unwrap();
    let second = repo.create(new_user("b@example.com")).await.unwrap();

    assert_eq!(first.id + 1, second.id);
    assert!(!first.verified);
    assert!(repo.exists_by_email("a@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = MockUserRepository::new();
    repo.create(new_user("a@example.com")).await.unwrap();

    let result = repo.create(new_user("a@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_verification_flow_clears_token() {
    let repo = MockUserRepository::new();
    let user = repo.create(new_user("a@example.com")).await.unwrap();

    repo.set_verification_token(user.id, "tok", Utc::now())
        .await
        .unwrap();
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.verification_token.as_deref(), Some("tok"));

    assert!(!repo.mark_verified(user.id, "other").await.unwrap());
    assert!(repo.mark_verified(user.id, "tok").await.unwrap());
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.verified);
    assert!(stored.verification_token.is_none());

    // consumed
    assert!(!repo.mark_verified(user.id, "tok").await.unwrap());
}

#[tokio::test]
async fn test_update_password_consumes_token_once() {
    let repo = MockUserRepository::new();
    let user = repo.create(new_user("a@example.com")).await.unwrap();
    repo.set_verification_token(user.id, "tok", Utc::now())
        .await
        .unwrap();

    assert!(repo.update_password(user.id, "tok", "first").await.unwrap());
    assert!(!repo.update_password(user.id, "tok", "second").await.unwrap());

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "first");
    assert!(stored.verification_token.is_none());
}

#[tokio::test]
async fn test_update_password_unknown_user() {
    let repo = MockUserRepository::new();
    assert!(!repo.update_password(99, "tok", "new").await.unwrap());
}
