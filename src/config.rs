//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default interval between background sweep passes, in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Cache configuration parameters.
///
/// Passed explicitly to `MemoryCache::new`; nothing is read from global state
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How often the background sweep runs. Zero disables active sweeping.
    pub sweep_interval: Duration,
    /// TTL value treated as "never expires", in addition to zero
    pub embed_expiry: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `CACHE_EMBED_EXPIRY` - "Forever" TTL sentinel in seconds (default: 0)
    pub fn from_env() -> Self {
        Self {
            sweep_interval: Duration::from_secs(
                env::var("CACHE_SWEEP_INTERVAL")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
            ),
            embed_expiry: Duration::from_secs(
                env::var("CACHE_EMBED_EXPIRY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0),
            ),
        }
    }

    /// Returns a copy with the given sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Returns a copy with the given embed expiry sentinel.
    pub fn with_embed_expiry(mut self, embed_expiry: Duration) -> Self {
        self.embed_expiry = embed_expiry;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            embed_expiry: Duration::ZERO,
        }
    }
}
