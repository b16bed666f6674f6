//! In-memory rate limiter.
//!
//! Uses a fixed-window counter per key in a HashMap behind one `RwLock`.
//! State is per process and lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitDecision, RateLimitError, RateLimitKey, RateLimiter};

use super::config::RateLimitConfig;

/// In-memory fixed-window rate limiter.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    /// Requests seen in the current window, including denied ones.
    count: u32,
    /// Unix millis at which the window ends.
    reset_at_ms: u64,
}

impl WindowState {
    /// The window is still live at exactly `reset_at_ms`.
    fn is_expired(&self, now_ms: u64) -> bool {
        self.reset_at_ms < now_ms
    }
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a rate limiter with default configuration (disabled).
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// [`RateLimiter::check`] at an explicit time.
    pub async fn check_at(&self, key: &RateLimitKey, now_ms: u64) -> RateLimitDecision {
        let limit = self.config.max_requests;
        if !self.config.enabled {
            return RateLimitDecision::unlimited(limit);
        }

        // Read, decide and increment under one write guard.
        let mut windows = self.windows.write().await;
        let state = windows
            .entry(key.as_key())
            .and_modify(|s| {
                if s.is_expired(now_ms) {
                    s.count = 0;
                    s.reset_at_ms = now_ms + self.config.window_ms;
                }
            })
            .or_insert_with(|| WindowState {
                count: 0,
                reset_at_ms: now_ms + self.config.window_ms,
            });

        state.count = state.count.saturating_add(1);

        RateLimitDecision {
            allowed: state.count <= limit,
            limit,
            remaining: limit.saturating_sub(state.count),
            reset_at_ms: state.reset_at_ms,
        }
    }

    /// [`RateLimiter::status`] at an explicit time.
    pub async fn status_at(&self, key: &RateLimitKey, now_ms: u64) -> RateLimitDecision {
        let limit = self.config.max_requests;
        if !self.config.enabled {
            return RateLimitDecision::unlimited(limit);
        }

        let windows = self.windows.read().await;
        let (count, reset_at_ms) = windows
            .get(&key.as_key())
            .filter(|s| !s.is_expired(now_ms))
            .map(|s| (s.count, s.reset_at_ms))
            .unwrap_or((0, now_ms + self.config.window_ms));

        RateLimitDecision {
            allowed: count < limit,
            limit,
            remaining: limit.saturating_sub(count),
            reset_at_ms,
        }
    }

    /// [`RateLimiter::sweep`] at an explicit time.
    pub async fn sweep_at(&self, now_ms: u64) -> usize {
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|_, s| !s.is_expired(now_ms));
        before - windows.len()
    }

    /// Number of tracked keys.
    pub async fn tracked_keys(&self) -> usize {
        self.windows.read().await.len()
    }

    fn now_ms() -> u64 {
        Timestamp::now().as_unix_millis()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError> {
        Ok(self.check_at(key, Self::now_ms()).await)
    }

    async fn status(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError> {
        Ok(self.status_at(key, Self::now_ms()).await)
    }

    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError> {
        let mut windows = self.windows.write().await;
        windows.remove(&key.as_key());
        Ok(())
    }

    async fn sweep(&self) -> Result<usize, RateLimitError> {
        let removed = self.sweep_at(Self::now_ms()).await;
        if removed > 0 {
            tracing::debug!(removed, "Swept expired rate limit windows");
        }
        Ok(removed)
    }
}
