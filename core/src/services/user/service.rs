//! User service implementation

use std::sync::Arc;

use parley_shared::validation::{
    is_valid_email, is_valid_password, length_between, normalize_email, NAME_MAX_LENGTH,
    PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH,
};
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;

/// Registration input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Service for user account operations
pub struct UserService<U: UserRepository, P: PasswordHasher> {
    user_repository: Arc<U>,
    password_hasher: Arc<P>,
}

impl<U: UserRepository, P: PasswordHasher> UserService<U, P> {
    /// Create a new user service
    pub fn new(user_repository: Arc<U>, password_hasher: Arc<P>) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// * `Ok(UserProfile)` - The created user
    /// * `Err(DomainError::ValidationErr)` - Bad name, email or password
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyInUse))` - Email taken
    pub async fn create(&self, input: NewUser) -> DomainResult<UserProfile> {
        let name = validate_name(&input.name)?;
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        let password_hash = self.password_hasher.hash(&input.password).await?;
        let user = self
            .user_repository
            .create(User::new(name, email, password_hash))
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user.profile())
    }

    /// List every user
    pub async fn list(&self) -> DomainResult<Vec<UserProfile>> {
        let users = self.user_repository.list().await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Fetch a single user
    pub async fn get(&self, id: Uuid) -> DomainResult<UserProfile> {
        self.find(id).await.map(|user| user.profile())
    }

    /// Apply a partial update to a user
    ///
    /// # Returns
    ///
    /// * `Ok(UserProfile)` - The updated user
    /// * `Err(DomainError::Validation)` - Nothing to update
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - The user no longer exists
    pub async fn update(&self, id: Uuid, changes: UserUpdate) -> DomainResult<UserProfile> {
        if changes.is_empty() {
            return Err(DomainError::Validation {
                message: "No fields to update".to_string(),
            });
        }

        let mut user = self.find(id).await?;

        if let Some(name) = changes.name {
            user.set_name(validate_name(&name)?);
        }
        if let Some(email) = changes.email {
            let email = validate_email(&email)?;
            if email != user.email {
                if let Some(other) = self.user_repository.find_by_email(&email).await? {
                    if other.id != user.id {
                        return Err(AuthError::EmailAlreadyInUse.into());
                    }
                }
                user.set_email(email);
            }
        }
        if let Some(password) = changes.password {
            validate_password(&password)?;
            user.set_password_hash(self.password_hasher.hash(&password).await?);
        }

        let user = self.user_repository.update(user).await?;
        info!(user_id = %user.id, "User updated");
        Ok(user.profile())
    }

    /// Delete a user
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.user_repository.delete(id).await? {
            return Err(AuthError::UserNotFound.into());
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "name".to_string(),
        });
    }
    if !length_between(name, 1, NAME_MAX_LENGTH) {
        return Err(ValidationError::InvalidLength {
            field: "name".to_string(),
            min: 1,
            max: NAME_MAX_LENGTH,
        });
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if !is_valid_password(password) {
        return Err(ValidationError::InvalidLength {
            field: "password".to_string(),
            min: PASSWORD_MIN_LENGTH,
            max: PASSWORD_MAX_LENGTH,
        });
    }
    Ok(())
}
