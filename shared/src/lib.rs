//! Shared utilities and common types for the Parley server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - The error response body returned by every endpoint
//! - Input validation helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig, SweepConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
