//! Unit tests for UserService

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::password::mock::PlainPasswordHasher;
use crate::services::user::{NewUser, UserService, UserUpdate};

fn setup() -> (UserService<MockUserRepository, PlainPasswordHasher>, Arc<MockUserRepository>) {
    let repo = Arc::new(MockUserRepository::new());
    let service = UserService::new(Arc::clone(&repo), Arc::new(PlainPasswordHasher));
    (service, repo)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ada".to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
    }
}

#[tokio::test]
async fn test_create_hashes_password_and_normalizes_email() {
    let (service, repo) = setup();

    let profile = service.create(new_user("Ada@Example.com")).await.unwrap();

    assert_eq!(profile.email, "ada@example.com");
    let stored = repo.find_by_id(profile.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "hashed:correct horse");
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let (service, _) = setup();
    service.create(new_user("ada@example.com")).await.unwrap();

    let result = service.create(new_user("ADA@example.com")).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyInUse))
    ));
}

#[tokio::test]
async fn test_create_validation() {
    let (service, _) = setup();

    let mut input = new_user("not-an-email");
    assert!(matches!(
        service.create(input.clone()).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    input.email = "ada@example.com".to_string();
    input.password = "short".to_string();
    assert!(matches!(
        service.create(input.clone()).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { .. }))
    ));

    input.password = "long enough".to_string();
    input.name = "   ".to_string();
    assert!(matches!(
        service.create(input).await,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_list_returns_profiles() {
    let (service, _) = setup();
    service.create(new_user("a@example.com")).await.unwrap();
    service.create(new_user("b@example.com")).await.unwrap();

    let users = service.list().await.unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn test_partial_update() {
    let (service, repo) = setup();
    let created = service.create(new_user("a@example.com")).await.unwrap();

    let updated = service
        .update(
            created.id,
            UserUpdate {
                name: Some("Grace".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Grace");
    assert_eq!(updated.email, "a@example.com");
    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "hashed:correct horse");
}

#[tokio::test]
async fn test_update_password() {
    let (service, repo) = setup();
    let created = service.create(new_user("a@example.com")).await.unwrap();

    service
        .update(
            created.id,
            UserUpdate {
                password: Some("another secret".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "hashed:another secret");
}

#[tokio::test]
async fn test_update_to_taken_email() {
    let (service, _) = setup();
    service.create(new_user("a@example.com")).await.unwrap();
    let b = service.create(new_user("b@example.com")).await.unwrap();

    let result = service
        .update(
            b.id,
            UserUpdate {
                email: Some("A@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyInUse))
    ));
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let (service, _) = setup();
    let created = service.create(new_user("a@example.com")).await.unwrap();

    let result = service.update(created.id, UserUpdate::default()).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_delete() {
    let (service, _) = setup();
    let created = service.create(new_user("a@example.com")).await.unwrap();

    service.delete(created.id).await.unwrap();

    assert!(matches!(
        service.get(created.id).await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
    assert!(matches!(
        service.delete(created.id).await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_update_missing_user() {
    let (service, _) = setup();
    let result = service
        .update(
            Uuid::new_v4(),
            UserUpdate {
                name: Some("Nobody".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserNotFound))));
}
