//! Server configuration module

use serde::Serialize;

use super::{parse_var, read_var, ConfigError, Environment, Lookup};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Read `SERVER_HOST`, `SERVER_PORT` (or `PORT`) and `SERVER_WORKERS`
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = if read_var(lookup, "SERVER_PORT").is_some() {
            parse_var(lookup, "SERVER_PORT", defaults.port)?
        } else {
            parse_var(lookup, "PORT", defaults.port)?
        };

        Ok(Self {
            host: read_var(lookup, "SERVER_HOST").unwrap_or(defaults.host),
            port,
            workers: parse_var(lookup, "SERVER_WORKERS", defaults.workers)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty with `allow_any_origin` unset means same-origin only
    pub allowed_origins: Vec<String>,

    /// Accept any origin (development)
    pub allow_any_origin: bool,

    /// Max age for preflight cache in seconds
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allow_any_origin: false,
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Create a permissive CORS configuration for development
    pub fn development() -> Self {
        Self {
            allow_any_origin: true,
            ..Default::default()
        }
    }

    /// Outside production every origin is accepted; in production only
    /// `ALLOWED_ORIGINS` (comma separated) are.
    pub fn from_lookup(lookup: Lookup<'_>, env: Environment) -> Result<Self, ConfigError> {
        let max_age = parse_var(lookup, "CORS_MAX_AGE", default_max_age())?;
        let allowed_origins = read_var(lookup, "ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            allowed_origins,
            allow_any_origin: !env.is_production(),
            max_age,
        })
    }
}

fn default_max_age() -> usize {
    300
}
