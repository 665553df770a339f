//! Environment configuration module

use serde::Serialize;

use super::{read_var, Lookup};

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get environment from `ENVIRONMENT`, `ENV` or `RUST_ENV`
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        read_var(lookup, "ENVIRONMENT")
            .or_else(|| read_var(lookup, "ENV"))
            .or_else(|| read_var(lookup, "RUST_ENV"))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize)]
pub struct LoggingConfig {
    /// Filter directive handed to the logger (`RUST_LOG` syntax)
    pub filter: String,
}

impl LoggingConfig {
    /// Default filter for an environment
    pub fn for_environment(env: Environment) -> Self {
        let filter = match env {
            Environment::Development => "debug,actix_server=info",
            Environment::Staging => "info",
            Environment::Production => "warn,actix_web::middleware::logger=info",
        };
        Self {
            filter: filter.to_string(),
        }
    }

    /// `RUST_LOG` wins over the environment default
    pub fn from_lookup(lookup: Lookup<'_>, env: Environment) -> Self {
        match read_var(lookup, "RUST_LOG") {
            Some(filter) => Self { filter },
            None => Self::for_environment(env),
        }
    }
}
