//! Login response value object returned by a successful login.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{token::TokenPair, user::User};

/// Identity of the logged-in user plus the freshly issued token pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    /// User id
    pub id: Uuid,

    /// User display name
    pub name: String,

    /// User email
    pub email: String,

    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,
}

impl LoginResponse {
    /// Creates a login response from a user and the tokens issued to them
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    /// * `pair` - The token pair issued for this login
    pub fn new(user: &User, pair: TokenPair) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
