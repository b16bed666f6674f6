//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Enforce per-IP limits on webhooks and the checkout API
    #[serde(default)]
    pub enable_rate_limiting: bool,

    /// Log checkout funnel events on the `analytics` target
    #[serde(default)]
    pub enable_analytics: bool,

    /// Mirror server errors onto the `error_tracking` target
    #[serde(default)]
    pub enable_error_tracking: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}
