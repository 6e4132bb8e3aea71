//! Unit tests for mock token repository implementation

use chrono::{Duration, Utc};

use crate::domain::entities::token::{FamilyCheck, RefreshTokenFamily, VerifiedRefreshToken};
use crate::repositories::token::{MockTokenRepository, TokenRepository};

fn presented(row: &RefreshTokenFamily) -> VerifiedRefreshToken {
    VerifiedRefreshToken {
        user_id: row.user_id,
        token_id: row.token_id.clone(),
        family_id: row.family_id.clone(),
    }
}

#[tokio::test]
async fn test_replace_family_keeps_one_row() {
    let repo = MockTokenRepository::new();
    let now = Utc::now();

    let first = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));
    let second = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));

    repo.replace_family(first).await.unwrap();
    repo.replace_family(second.clone()).await.unwrap();

    assert_eq!(repo.len().await, 1);
    let stored = repo.find_family("fam").await.unwrap().unwrap();
    assert_eq!(stored.token_id, second.token_id);
}

#[tokio::test]
async fn test_check_current_leaves_row() {
    let repo = MockTokenRepository::new();
    let now = Utc::now();
    let row = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));
    repo.replace_family(row.clone()).await.unwrap();

    let check = repo.check_family(&presented(&row), now).await.unwrap();
    assert_eq!(check, FamilyCheck::Current(row));
    assert!(repo.contains_family("fam").await);
}

#[tokio::test]
async fn test_check_replayed_deletes_family() {
    let repo = MockTokenRepository::new();
    let now = Utc::now();
    let row = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));
    repo.replace_family(row.clone()).await.unwrap();

    let mut stale = presented(&row);
    stale.token_id = "rotated-out".to_string();

    let check = repo.check_family(&stale, now).await.unwrap();
    assert_eq!(check, FamilyCheck::Replayed);
    assert!(!repo.contains_family("fam").await);

    // The legitimate token is gone too
    let check = repo.check_family(&presented(&row), now).await.unwrap();
    assert_eq!(check, FamilyCheck::Missing);
}

#[tokio::test]
async fn test_check_expired_deletes_family() {
    let repo = MockTokenRepository::new();
    let now = Utc::now();
    let row = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));
    repo.replace_family(row.clone()).await.unwrap();

    let later = now + Duration::days(8);
    let check = repo.check_family(&presented(&row), later).await.unwrap();
    assert_eq!(check, FamilyCheck::Expired);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_delete_user_families_and_expired() {
    let repo = MockTokenRepository::new();
    let now = Utc::now();

    repo.replace_family(RefreshTokenFamily::issue(1, "a".to_string(), now, Duration::days(7)))
        .await
        .unwrap();
    repo.replace_family(RefreshTokenFamily::issue(1, "b".to_string(), now, Duration::days(1)))
        .await
        .unwrap();
    repo.replace_family(RefreshTokenFamily::issue(2, "c".to_string(), now, Duration::days(1)))
        .await
        .unwrap();

    assert_eq!(repo.delete_expired(now + Duration::days(2)).await.unwrap(), 2);
    assert_eq!(repo.delete_user_families(1).await.unwrap(), 1);
    assert!(repo.is_empty().await);
    assert!(!repo.delete_family("a").await.unwrap());
}

#[tokio::test]
async fn test_rotate_family_requires_current_token() {
    let repo = MockTokenRepository::new();
    let now = Utc::now();
    let row = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));
    repo.replace_family(row.clone()).await.unwrap();

    let next = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));
    assert!(!repo.rotate_family("stale", next.clone()).await.unwrap());
    assert_eq!(repo.find_family("fam").await.unwrap(), Some(row.clone()));

    assert!(repo.rotate_family(&row.token_id, next.clone()).await.unwrap());
    assert_eq!(repo.find_family("fam").await.unwrap(), Some(next.clone()));

    repo.delete_family("fam").await.unwrap();
    let revived = RefreshTokenFamily::issue(1, "fam".to_string(), now, Duration::days(7));
    assert!(!repo.rotate_family(&next.token_id, revived).await.unwrap());
    assert!(!repo.contains_family("fam").await);
}
