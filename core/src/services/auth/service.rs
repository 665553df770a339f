//! Main authentication service implementation

use std::sync::Arc;

use parley_shared::validation::normalize_email;
use tracing::{debug, info};

use crate::domain::value_objects::LoginResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{TokenRegistry, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

/// Authentication service for the login flow
pub struct AuthService<U, P, R>
where
    U: UserRepository,
    P: PasswordHasher,
    R: TokenRegistry,
{
    /// User repository for credential lookup
    user_repository: Arc<U>,
    /// Password verification
    password_hasher: Arc<P>,
    /// Token issuance
    token_service: Arc<TokenService<R>>,
}

impl<U, P, R> AuthService<U, P, R>
where
    U: UserRepository,
    P: PasswordHasher,
    R: TokenRegistry,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user lookup
    /// * `password_hasher` - Verifies submitted passwords
    /// * `token_service` - Issues the token pair
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<P>,
        token_service: Arc<TokenService<R>>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_service,
        }
    }

    /// Log a user in with email and password
    ///
    /// An unknown email and a wrong password produce the same
    /// [`AuthError::InvalidCredentials`]. Nothing is written to the token
    /// registry unless every step succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)` - User identity plus a fresh token pair
    /// * `Err(DomainError)` - Credentials rejected or an internal failure
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResponse> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self
            .password_hasher
            .verify(password, &user.password_hash)
            .await?
        {
            debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = self.token_service.issue_pair(&user.id.to_string())?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse::new(&user, pair))
    }
}
