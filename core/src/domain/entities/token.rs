//! Token entities for bearer authentication.
//!
//! A [`Token`] is the canonical server-side record of an issued token. The
//! signed string handed to clients carries the same identity as [`Claims`];
//! the registry copy stays authoritative for revocation and the validity
//! window.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Kind of a token, fixed at issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token accepted by protected endpoints
    Access,
    /// Long-lived token issued alongside the access token
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Canonical record of an issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Unique token identifier (`jti` on the wire)
    pub id: Uuid,

    /// Access or refresh
    pub kind: TokenKind,

    /// Identifier of the user the token was issued to
    pub subject: String,

    /// Start of the validity window
    pub issued_at: DateTime<Utc>,

    /// End of the validity window (exclusive)
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub revoked: bool,
}

impl Token {
    /// Creates a new, non-revoked token with a fresh random id
    ///
    /// # Arguments
    ///
    /// * `kind` - Access or refresh
    /// * `subject` - The user id the token is issued to
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn new(kind: TokenKind, subject: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            subject: subject.into(),
            issued_at,
            expires_at: issued_at + ttl,
            revoked: false,
        }
    }

    /// `true` once `now` has reached `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// `true` while `now` is before `issued_at`
    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.issued_at
    }

    /// Checks that the token is usable at `now`
    ///
    /// Revocation is reported first, then expiry, then a window that has
    /// not opened yet.
    pub fn ensure_active_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if self.revoked {
            return Err(TokenError::TokenRevoked);
        }
        if self.is_expired_at(now) {
            return Err(TokenError::TokenExpired);
        }
        if self.is_not_yet_valid_at(now) {
            return Err(TokenError::TokenNotYetValid);
        }
        Ok(())
    }

    /// Marks the token as revoked
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}

/// Claims carried inside a signed token
///
/// The shape is fixed: a payload with a missing field or an unknown `kind`
/// fails to deserialize and the token is treated as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Token id
    pub jti: String,

    /// Subject (user id)
    pub sub: String,

    /// Token kind
    pub kind: TokenKind,

    /// Issued at, unix seconds
    pub iat: i64,

    /// Expiration, unix seconds
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Builds the wire claims for a canonical token
    pub fn for_token(token: &Token, issuer: &str) -> Self {
        Self {
            jti: token.id.to_string(),
            sub: token.subject.clone(),
            kind: token.kind,
            iat: token.issued_at.timestamp(),
            exp: token.expires_at.timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Parses the token id
    pub fn token_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.jti)
    }
}

/// Access and refresh tokens issued together at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Canonical access record
    pub access: Token,

    /// Canonical refresh record
    pub refresh: Token,
}

/// Result of a successful authentication: the registry's canonical copy and
/// the raw string the client presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedToken {
    pub token: Token,
    pub raw: String,
}

impl AuthenticatedToken {
    /// Subject of the authenticated token
    pub fn subject(&self) -> &str {
        &self.token.subject
    }
}
