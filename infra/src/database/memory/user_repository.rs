//! In-memory implementation of UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use parley_core::domain::entities::user::User;
use parley_core::errors::{AuthError, DomainError};
use parley_core::repositories::UserRepository;

/// User store keyed by id with a secondary email index
///
/// Both maps sit behind one lock so the email uniqueness check and the
/// insert are atomic.
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Users>,
}

#[derive(Default)]
struct Users {
    by_id: HashMap<Uuid, User>,
    id_by_email: HashMap<String, Uuid>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.inner.read().await;
        Ok(users
            .id_by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.inner.read().await;
        Ok(users.by_id.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.inner.read().await;
        let mut all: Vec<User> = users.by_id.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.inner.write().await;

        if users.id_by_email.contains_key(&user.email) {
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        users.id_by_email.insert(user.email.clone(), user.id);
        users.by_id.insert(user.id, user.clone());
        debug!(user_id = %user.id, "Stored new user");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.inner.write().await;

        let previous_email = match users.by_id.get(&user.id) {
            Some(existing) => existing.email.clone(),
            None => {
                return Err(DomainError::NotFound {
                    resource: "User".to_string(),
                })
            }
        };

        if previous_email != user.email {
            if users.id_by_email.contains_key(&user.email) {
                return Err(AuthError::EmailAlreadyInUse.into());
            }
            users.id_by_email.remove(&previous_email);
            users.id_by_email.insert(user.email.clone(), user.id);
        }

        users.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.inner.write().await;

        match users.by_id.remove(&id) {
            Some(user) => {
                users.id_by_email.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn user(email: &str) -> User {
        User::new("Test".to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("a@example.com")).await.unwrap();

        let by_email = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(by_email.id, created.id);
        assert_eq!(by_id, created);
        assert!(repo.find_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a@example.com")).await.unwrap();

        let result = repo.create(user("a@example.com")).await;

        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::EmailAlreadyInUse))
        ));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_moves_email_index() {
        let repo = InMemoryUserRepository::new();
        let mut created = repo.create(user("a@example.com")).await.unwrap();

        created.set_email("c@example.com".to_string());
        repo.update(created.clone()).await.unwrap();

        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
        assert_eq!(
            repo.find_by_email("c@example.com").await.unwrap().unwrap().id,
            created.id
        );
        // The old address is free again
        assert!(repo.create(user("a@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a@example.com")).await.unwrap();
        let mut b = repo.create(user("b@example.com")).await.unwrap();

        b.set_email("a@example.com".to_string());

        assert!(matches!(
            repo.update(b).await,
            Err(DomainError::Auth(AuthError::EmailAlreadyInUse))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let repo = InMemoryUserRepository::new();
        assert!(matches!(
            repo.update(user("a@example.com")).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("a@example.com")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_with_same_email() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.create(user("same@example.com")).await.is_ok() })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
    }
}
