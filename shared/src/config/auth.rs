//! Authentication configuration: signing secret, token lifetimes and
//! registry sweeping

use std::fmt;

use serde::Serialize;

use super::{parse_var, read_var, ConfigError, Lookup};

/// Default access token lifetime (1 hour)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 7 * 24 * 3600;

/// Default issuer claim
pub const DEFAULT_ISSUER: &str = "parley";

/// Default interval between registry sweeps (5 minutes)
pub const DEFAULT_SWEEP_INTERVAL: u64 = 300;

/// Shortest secret accepted when running in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// JWT signing configuration
#[derive(Clone, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret; never serialized or printed
    #[serde(skip_serializing)]
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl JwtConfig {
    /// Create a JWT configuration with the default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Whether the secret is too short for production use
    pub fn is_weak_secret(&self) -> bool {
        self.secret.len() < MIN_PRODUCTION_SECRET_LEN
    }

    fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let secret = read_var(lookup, "JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        let access_token_expiry =
            parse_var(lookup, "JWT_ACCESS_TOKEN_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY)?;
        let refresh_token_expiry =
            parse_var(lookup, "JWT_REFRESH_TOKEN_EXPIRY", DEFAULT_REFRESH_TOKEN_EXPIRY)?;

        for (key, value) in [
            ("JWT_ACCESS_TOKEN_EXPIRY", access_token_expiry),
            ("JWT_REFRESH_TOKEN_EXPIRY", refresh_token_expiry),
        ] {
            if value <= 0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.to_string(),
                });
            }
        }

        Ok(Self {
            secret,
            access_token_expiry,
            refresh_token_expiry,
            issuer: read_var(lookup, "JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Background sweep of expired registry entries
#[derive(Debug, Clone, Serialize)]
pub struct SweepConfig {
    /// Seconds between sweeps
    pub interval_seconds: u64,

    /// Whether the sweeper runs at all
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_SWEEP_INTERVAL,
            enabled: true,
        }
    }
}

impl SweepConfig {
    fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let interval_seconds = parse_var(lookup, "TOKEN_SWEEP_INTERVAL", DEFAULT_SWEEP_INTERVAL)?;
        Ok(Self {
            // zero disables the sweeper
            enabled: interval_seconds > 0,
            interval_seconds,
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Registry sweeping
    pub sweep: SweepConfig,
}

impl AuthConfig {
    /// Create from a variable source; `JWT_SECRET` is mandatory
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_lookup(lookup)?,
            sweep: SweepConfig::from_lookup(lookup)?,
        })
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}
