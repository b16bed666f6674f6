//! Rate limiting port for protecting the webhook and checkout endpoints.
//!
//! Implementations use a fixed-window counter per key. Callers depend on
//! this trait, never on a concrete store, so tests can inject their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Port for rate limiting operations.
///
/// Implementations must be thread-safe; `check` is atomic per key.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records one request against `key` and decides whether it may proceed.
    ///
    /// Denied requests still count toward the window.
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError>;

    /// Current quota for `key` without consuming any.
    async fn status(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError>;

    /// Clears the window for `key`, restoring full quota.
    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError>;

    /// Removes expired windows; returns how many were removed.
    async fn sweep(&self) -> Result<usize, RateLimitError>;
}

/// Key identifying what to rate limit.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Endpoint family the limit applies to.
    pub scope: RateLimitScope,
    /// Client identifier within the scope (normally the client IP).
    pub identifier: String,
}

/// The endpoint family at which rate limiting is applied.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitScope {
    /// Inbound payment provider webhooks.
    Webhook,
    /// Customer-facing checkout API.
    Checkout,
}

impl RateLimitKey {
    /// Key for a webhook sender.
    pub fn webhook(client_ip: &str) -> Self {
        Self {
            scope: RateLimitScope::Webhook,
            identifier: client_ip.to_string(),
        }
    }

    /// Key for a checkout API caller.
    pub fn checkout(client_ip: &str) -> Self {
        Self {
            scope: RateLimitScope::Checkout,
            identifier: client_ip.to_string(),
        }
    }

    /// Storage key string, e.g. `webhook:10.0.0.1`.
    pub fn as_key(&self) -> String {
        format!("{}:{}", self.scope.as_str(), self.identifier)
    }
}

impl RateLimitScope {
    /// Returns the string representation of the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitScope::Webhook => "webhook",
            RateLimitScope::Checkout => "checkout",
        }
    }
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.identifier)
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Unix millis at which the window ends; 0 when limiting is disabled.
    pub reset_at_ms: u64,
}

impl RateLimitDecision {
    /// Decision used when limiting is turned off.
    pub fn unlimited(limit: u32) -> Self {
        Self {
            allowed: true,
            limit,
            remaining: limit,
            reset_at_ms: 0,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Whole seconds until the window resets, at least 1 while denied.
    pub fn retry_after_secs(&self, now_ms: u64) -> u64 {
        let secs = self.reset_at_ms.saturating_sub(now_ms).div_ceil(1000);
        if self.allowed {
            secs
        } else {
            secs.max(1)
        }
    }

    /// Window reset as whole unix seconds.
    pub fn reset_at_secs(&self) -> u64 {
        self.reset_at_ms / 1000
    }
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),

    /// Invalid rate limit key provided.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_key_has_correct_scope() {
        let key = RateLimitKey::webhook("192.168.1.1");
        assert_eq!(key.scope, RateLimitScope::Webhook);
        assert_eq!(key.identifier, "192.168.1.1");
    }

    #[test]
    fn key_string_is_scope_prefixed() {
        assert_eq!(RateLimitKey::webhook("10.0.0.1").as_key(), "webhook:10.0.0.1");
        assert_eq!(RateLimitKey::checkout("unknown").as_key(), "checkout:unknown");
        assert_eq!(RateLimitKey::webhook("1.2.3.4").to_string(), "webhook:1.2.3.4");
    }

    #[test]
    fn unlimited_decision_has_full_quota() {
        let d = RateLimitDecision::unlimited(100);
        assert!(d.is_allowed());
        assert_eq!(d.remaining, 100);
        assert_eq!(d.reset_at_ms, 0);
    }

    #[test]
    fn retry_after_rounds_up() {
        let d = RateLimitDecision {
            allowed: false,
            limit: 100,
            remaining: 0,
            reset_at_ms: 10_500,
        };
        assert_eq!(d.retry_after_secs(9_000), 2);
        assert_eq!(d.retry_after_secs(10_500), 1);
        assert_eq!(d.retry_after_secs(20_000), 1);
    }

    #[test]
    fn scope_as_str_returns_correct_values() {
        assert_eq!(RateLimitScope::Webhook.as_str(), "webhook");
        assert_eq!(RateLimitScope::Checkout.as_str(), "checkout");
    }
}
