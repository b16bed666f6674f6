//! Rate limit configuration types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed-window rate limit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// When false every check is allowed and nothing is recorded.
    pub enabled: bool,
    /// Window length in milliseconds.
    pub window_ms: u64,
    /// Maximum requests per key per window.
    pub max_requests: u32,
    /// How often expired windows are swept, in milliseconds.
    pub sweep_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window_ms: 900_000,
            max_requests: 100,
            sweep_interval_ms: 60_000,
        }
    }
}

impl RateLimitConfig {
    /// Default limits with limiting turned on.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, max_requests: u32, window_ms: u64) -> Self {
        self.max_requests = max_requests;
        self.window_ms = window_ms;
        self
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}
