//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - token signing secret, token lifetimes and registry sweeping
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//!
//! Every value is read once at process start and is immutable afterwards.

pub mod auth;
pub mod environment;
pub mod server;

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, SweepConfig};
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Errors raised while assembling configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0}")]
    Insecure(String),
}

/// Variable lookup used by the loaders; `std::env::var` in production,
/// a map in tests.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment, reading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);
        let auth = AuthConfig::from_lookup(lookup)?;

        if environment.is_production() && auth.jwt.is_weak_secret() {
            return Err(ConfigError::Insecure(format!(
                "JWT_SECRET must be at least {} bytes in production",
                auth::MIN_PRODUCTION_SECRET_LEN
            )));
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            auth,
            cors: CorsConfig::from_lookup(lookup, environment)?,
            logging: LoggingConfig::from_lookup(lookup, environment),
        })
    }
}

/// Read an optional variable, treating blank values as unset
pub(crate) fn read_var(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Read and parse a variable, falling back to `default` when unset
pub(crate) fn parse_var<T: FromStr>(
    lookup: Lookup<'_>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match read_var(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}
