//! Periodic purge of expired denylist entries
//!
//! Denylist entries only need to outlive the token they block. Once that
//! instant has passed the codec would reject the token as expired anyway, so
//! the entry can go.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::services::codec::TokenCodec;

/// Configuration for the denylist cleanup service
#[derive(Debug, Clone)]
pub struct DenylistCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for DenylistCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service for purging expired denylist entries from a codec
pub struct DenylistCleanupService<C: TokenCodec> {
    codec: Arc<C>,
    config: DenylistCleanupConfig,
}

impl<C: TokenCodec> DenylistCleanupService<C> {
    /// Create a new cleanup service
    pub fn new(codec: Arc<C>, config: DenylistCleanupConfig) -> Self {
        Self { codec, config }
    }

    /// The service configuration
    pub fn config(&self) -> &DenylistCleanupConfig {
        &self.config
    }

    /// Run a single cleanup cycle
    ///
    /// A disabled service does nothing and reports an empty result. Codec
    /// failures are collected in the result rather than returned.
    pub fn run_cleanup(&self) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        let mut result = CleanupResult::default();

        match self.codec.purge_denylist() {
            Ok(count) => {
                result.denylist_entries_purged = count;
                if count > 0 {
                    info!("Purged {} expired denylist entries", count);
                }
            }
            Err(e) => {
                error!("Failed to purge denylist: {}", e);
                result.errors.push(format!("Denylist cleanup error: {}", e));
            }
        }

        result
    }
}

impl<C: TokenCodec + 'static> DenylistCleanupService<C> {
    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals, starting
    /// immediately. Must be called from within a tokio runtime. Returns `None`
    /// when the service is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Denylist cleanup service is disabled");
            return None;
        }

        // tokio rejects a zero period
        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        let handle = tokio::spawn(async move {
            info!(
                "Denylist cleanup service started - will run every {} seconds",
                interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let result = self.run_cleanup();
                if !result.is_success() {
                    warn!("Cleanup completed with errors: {:?}", result.errors);
                }
            }
        });

        Some(handle)
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired denylist entries removed
    pub denylist_entries_purged: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of items cleaned up
    pub fn total_cleaned(&self) -> usize {
        self.denylist_entries_purged
    }
}
