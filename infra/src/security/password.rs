//! bcrypt implementation of PasswordHasher
//!
//! Hashing is CPU-bound and deliberately slow, so both operations run on
//! tokio's blocking pool instead of an async worker.

use async_trait::async_trait;
use tracing::error;

use parley_core::errors::DomainError;
use parley_core::services::PasswordHasher;

/// Password hasher backed by bcrypt
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn internal(message: &str) -> DomainError {
    DomainError::Internal {
        message: message.to_string(),
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| {
                error!("Password hashing task failed: {}", e);
                internal("password hashing failed")
            })?
            .map_err(|e| {
                error!("Password hashing failed: {}", e);
                internal("password hashing failed")
            })
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                error!("Password verification task failed: {}", e);
                internal("password verification failed")
            })?
            .map_err(|e| {
                error!("Stored password hash is unusable: {}", e);
                internal("password verification failed")
            })
    }
}
