//! Domain-specific error types for authentication and related operations
//!
//! The presentation layer maps each variant to an HTTP status and a stable
//! error code; the messages here are safe to show to clients.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Wrong token kind: expected {expected} token, got {actual} token")]
    WrongTokenKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token not registered")]
    NotRegistered,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Failures that point at a forged or tampered token
    pub fn is_cryptographic(&self) -> bool {
        matches!(self, TokenError::InvalidSignature | TokenError::UnsupportedAlgorithm)
    }
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },
}
