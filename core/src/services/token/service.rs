//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{AuthenticatedToken, Claims, Token, TokenKind, TokenPair};
use crate::errors::TokenError;
use crate::repositories::TokenRegistry;

use super::config::TokenServiceConfig;
use super::signer::TokenSigner;

/// Service for issuing, authenticating and revoking bearer tokens
///
/// Every token it hands out is recorded in the registry first; a signed
/// token that the registry does not know is never accepted.
pub struct TokenService<R: TokenRegistry> {
    registry: Arc<R>,
    signer: TokenSigner,
    config: TokenServiceConfig,
}

impl<R: TokenRegistry> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `registry` - Shared token registry
    /// * `config` - Token service configuration
    pub fn new(registry: Arc<R>, config: TokenServiceConfig) -> Self {
        let signer = TokenSigner::new(config.jwt_secret.as_bytes(), config.issuer.clone());
        Self {
            registry,
            signer,
            config,
        }
    }

    /// The registry this service records tokens in
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// The signer used for issuance and verification
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Issues an access token and a refresh token for a subject
    ///
    /// Each token is signed before it is registered. If the refresh token
    /// cannot be issued the access entry is removed again, so a failure
    /// leaves the registry as it was.
    ///
    /// # Arguments
    ///
    /// * `subject` - The user id the tokens are issued to
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Two signed, registered tokens with distinct ids
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, TokenError> {
        // The wire format carries whole seconds; keep the registry copy identical.
        let now = Utc::now().trunc_subsecs(0);

        let (access, access_token) = self.register_signed(TokenKind::Access, subject, now)?;
        let (refresh, refresh_token) = match self.register_signed(TokenKind::Refresh, subject, now) {
            Ok(issued) => issued,
            Err(e) => {
                // Never leave half a pair behind
                self.registry.remove(access.id);
                return Err(e);
            }
        };

        debug!(
            subject = subject,
            access_id = %access.id,
            refresh_id = %refresh.id,
            "Issued token pair"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            access,
            refresh,
        })
    }

    /// Mints, signs and registers one token
    ///
    /// The id is claimed with an atomic insert-if-absent; on a collision a
    /// new id is drawn and the token is signed again.
    fn register_signed(
        &self,
        kind: TokenKind,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<(Token, String), TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.config.access_token_ttl,
            TokenKind::Refresh => self.config.refresh_token_ttl,
        };

        loop {
            let token = Token::new(kind, subject, now, ttl);
            let raw = self.signer.sign(&Claims::for_token(&token, self.signer.issuer()))?;
            if self.registry.try_put(token.clone()) {
                return Ok((token, raw));
            }
            debug!(token_id = %token.id, "Token id already registered, minting another");
        }
    }

    /// Authenticates a presented bearer string against the current time
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticatedToken)` - The registry copy of the token
    /// * `Err(TokenError)` - The first check that failed, in order: empty
    ///   input, signature and claims, registered id, revocation, validity
    ///   window
    pub fn authenticate(&self, raw: &str) -> Result<AuthenticatedToken, TokenError> {
        self.authenticate_at(raw, Utc::now())
    }

    /// Same as [`authenticate`](Self::authenticate) with an explicit clock
    pub fn authenticate_at(&self, raw: &str, now: DateTime<Utc>) -> Result<AuthenticatedToken, TokenError> {
        let result = self.check(raw, now);
        match &result {
            Err(e) if e.is_cryptographic() => warn!("Rejected bearer token: {}", e),
            Err(e) => debug!("Rejected bearer token: {}", e),
            Ok(_) => {}
        }
        result
    }

    fn check(&self, raw: &str, now: DateTime<Utc>) -> Result<AuthenticatedToken, TokenError> {
        if raw.trim().is_empty() {
            return Err(TokenError::MissingToken);
        }

        let claims = self.signer.verify(raw)?;
        let id = claims
            .token_id()
            .map_err(|_| TokenError::InvalidTokenFormat)?;

        let token = self.registry.get(id).ok_or(TokenError::NotRegistered)?;

        token.ensure_active_at(now)?;

        Ok(AuthenticatedToken {
            token,
            raw: raw.to_string(),
        })
    }

    /// Revokes a token by id
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - The revoked canonical copy
    /// * `Err(TokenError::NotRegistered)` - Unknown id
    pub fn revoke(&self, id: Uuid) -> Result<Token, TokenError> {
        let token = self.registry.revoke(id)?;
        info!(token_id = %id, kind = %token.kind, "Token revoked");
        Ok(token)
    }

    /// Revokes every token issued to `subject`, access and refresh alike
    ///
    /// # Returns
    ///
    /// Number of tokens that were still active and are now revoked
    pub fn revoke_subject(&self, subject: &str) -> usize {
        let revoked = self.registry.revoke_subject(subject);
        info!(subject = subject, revoked = revoked, "Revoked all tokens of subject");
        revoked
    }
}
