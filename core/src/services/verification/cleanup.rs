//! Periodic sweep of expired verification codes
//!
//! Codes that are issued and never verified would otherwise stay in the
//! store forever. The sweeper removes them on a fixed interval.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use lh_shared::VerificationConfig;

use super::clock::{Clock, SystemClock};
use super::store::VerificationCodeStore;

/// Configuration for the verification sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl From<&VerificationConfig> for SweeperConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds,
            enabled: config.sweep_enabled,
        }
    }
}

/// Sweeps expired codes out of a shared store
pub struct VerificationSweeper<K: Clock + 'static = SystemClock> {
    store: Arc<VerificationCodeStore<K>>,
    config: SweeperConfig,
}

impl<K: Clock + 'static> VerificationSweeper<K> {
    pub fn new(store: Arc<VerificationCodeStore<K>>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep cycle
    pub fn run_sweep(&self) -> SweepResult {
        let removed = self.store.sweep_expired();
        let result = SweepResult {
            removed,
            remaining: self.store.len(),
        };

        if removed > 0 {
            info!(
                removed = result.removed,
                remaining = result.remaining,
                "Swept expired verification codes"
            );
        } else {
            debug!(remaining = result.remaining, "No expired verification codes to sweep");
        }

        result
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` without spawning anything when the sweeper is
    /// disabled. Must be called from within a tokio runtime.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Verification code sweeper is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Verification code sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so the first
            // sweep happens one full interval after startup.
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;
                self.run_sweep();
            }
        }))
    }

    pub fn config(&self) -> &SweeperConfig {
        &self.config
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired entries removed
    pub removed: usize,
    /// Number of entries left in the store afterwards
    pub remaining: usize,
}
