//! # Parley Core
//!
//! Core business logic and domain layer for the Parley backend.
//! This crate contains domain entities, the token registry, business
//! services, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthenticatedToken, Claims, LoginResponse, Token, TokenKind, TokenPair, User, UserProfile,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{InMemoryTokenRegistry, TokenRegistry, UserRepository};
pub use services::{
    AuthService, CleanupResult, NewUser, PasswordHasher, TokenCleanupConfig,
    TokenCleanupService, TokenPolicy, TokenService, TokenServiceConfig, TokenSigner, UserService,
    UserUpdate,
};
