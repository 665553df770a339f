//! Token service module
//!
//! This module handles the whole token lifecycle:
//! - HS256 signing and verification of bearer tokens
//! - Issuance of access/refresh pairs, registered before they are returned
//! - Authentication of presented tokens against the registry
//! - Revocation
//! - Background purging of expired registry entries

mod cleanup;
mod config;
mod service;
mod signer;


pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use signer::TokenSigner;
