//! Password hashing seam used by login and account management.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Hashes and verifies user passwords
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match
    /// * `Err(DomainError::Internal)` - The stored hash is unusable
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
