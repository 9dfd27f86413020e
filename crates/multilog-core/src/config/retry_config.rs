//! Retry policy for the optimistic commit loop.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use multilog_core::config::RetryConfig;
//!
//! let config = RetryConfig::default();
//! assert_eq!(config.backoff(0), Duration::from_millis(10));
//! assert_eq!(config.backoff(3), Duration::from_millis(80));
//! assert_eq!(config.backoff(30), Duration::from_millis(1_000));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Pushes attempted before giving up. Default: 8.
    pub max_attempts: u32,
    /// Backoff after the first rejected push, in ms. Default: 10.
    pub initial_backoff_ms: u64,
    /// Backoff ceiling, in ms. Default: 1000.
    pub max_backoff_ms: u64,
}

impl RetryConfig {
    /// Backoff before retry number `attempt` (0-based): exponential, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let ms = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
        }
    }
}
