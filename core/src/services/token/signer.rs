//! HMAC-SHA256 signature engine for bearer tokens

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// Signs claims into compact JWS strings and verifies them
///
/// Only `HS256` is accepted on verification; a token whose header names any
/// other algorithm is rejected before its signature is looked at. Expiry is
/// checked with no leeway and the issuer must match.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenSigner {
    /// Creates a signer for a shared secret
    ///
    /// # Arguments
    ///
    /// * `secret` - HMAC key shared by signing and verification
    /// * `issuer` - Expected `iss` claim
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer,
        }
    }

    /// Issuer this signer stamps and expects
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Signs claims into a token string
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    /// Verifies a token string and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, algorithm, issuer and expiry all check out
    /// * `Err(TokenError)` - `InvalidSignature`, `UnsupportedAlgorithm`,
    ///   `TokenExpired`, or `InvalidTokenFormat` for anything malformed
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm,
                _ => TokenError::InvalidTokenFormat,
            })
    }
}
