//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core depends on:
//!
//! - **Database**: an in-memory user store behind the `UserRepository` trait
//! - **Security**: bcrypt password hashing behind the `PasswordHasher` trait
//!
//! The token registry needs no adapter here; its in-memory implementation
//! lives next to the trait in `parley_core`.

/// Database module - user storage
pub mod database;

/// Security module - password hashing
pub mod security;

pub use database::memory::InMemoryUserRepository;
pub use security::password::BcryptPasswordHasher;
