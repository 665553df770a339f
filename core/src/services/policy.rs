//! Endpoint-level rule for which token kind an operation accepts.

use crate::domain::entities::token::{Token, TokenKind};
use crate::errors::AuthError;

/// Accepts exactly one token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub accepted: TokenKind,
}

impl TokenPolicy {
    /// Policy for ordinary protected endpoints
    pub const fn access() -> Self {
        Self {
            accepted: TokenKind::Access,
        }
    }

    /// Policy for endpoints that take a refresh token
    pub const fn refresh() -> Self {
        Self {
            accepted: TokenKind::Refresh,
        }
    }

    /// Rejects a token of the wrong kind with [`AuthError::WrongTokenKind`]
    pub fn check(&self, token: &Token) -> Result<(), AuthError> {
        if token.kind == self.accepted {
            Ok(())
        } else {
            Err(AuthError::WrongTokenKind {
                expected: self.accepted,
                actual: token.kind,
            })
        }
    }
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self::access()
    }
}
