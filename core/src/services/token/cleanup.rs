//! Token cleanup service for periodic maintenance of the token registry
//!
//! Expired tokens are rejected on use regardless of this service; purging
//! only keeps the registry from growing without bound.

use std::sync::Arc;

use chrono::Utc;
use parley_shared::config::SweepConfig;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::repositories::TokenRegistry;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            enabled: true,
        }
    }
}

impl From<&SweepConfig> for TokenCleanupConfig {
    fn from(config: &SweepConfig) -> Self {
        Self {
            interval_seconds: config.interval_seconds,
            enabled: config.enabled && config.interval_seconds > 0,
        }
    }
}

/// Service for purging expired tokens from the registry
pub struct TokenCleanupService<R: TokenRegistry + 'static> {
    registry: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRegistry + 'static> TokenCleanupService<R> {
    /// Create a new token cleanup service
    pub fn new(registry: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { registry, config }
    }

    /// Run a single cleanup cycle
    pub fn run_cleanup(&self) -> CleanupResult {
        let expired_tokens_purged = self.registry.purge_expired(Utc::now());
        let result = CleanupResult {
            expired_tokens_purged,
            remaining_tokens: self.registry.len(),
        };

        if result.expired_tokens_purged > 0 {
            info!(
                "Token cleanup completed - Purged: {}, Remaining: {}",
                result.expired_tokens_purged, result.remaining_tokens
            );
        } else {
            debug!("Token cleanup found nothing to purge");
        }

        result
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_cleanup();
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired tokens removed
    pub expired_tokens_purged: usize,
    /// Number of tokens left in the registry
    pub remaining_tokens: usize,
}
