//! Rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::rate_limiter::RateLimitConfig;

/// Fixed-window limits; switched on by `features.enable_rate_limiting`
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

impl RateLimitSettings {
    /// Limiter configuration with the given on/off switch
    pub fn limiter_config(&self, enabled: bool) -> RateLimitConfig {
        RateLimitConfig {
            enabled,
            window_ms: self.window_ms,
            max_requests: self.max_requests,
            sweep_interval_ms: self.sweep_interval_ms,
        }
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_ms == 0 {
            return Err(ValidationError::InvalidRateLimit("window_ms must be positive"));
        }
        if self.max_requests == 0 {
            return Err(ValidationError::InvalidRateLimit("max_requests must be positive"));
        }
        if self.sweep_interval_ms == 0 {
            return Err(ValidationError::InvalidRateLimit(
                "sweep_interval_ms must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

fn default_window_ms() -> u64 {
    900_000
}

fn default_max_requests() -> u32 {
    100
}

fn default_sweep_interval_ms() -> u64 {
    60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RateLimitSettings::default();
        assert_eq!(settings.window_ms, 900_000);
        assert_eq!(settings.max_requests, 100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_limiter_config_carries_switch() {
        let config = RateLimitSettings::default().limiter_config(true);
        assert!(config.enabled);
        assert_eq!(config.max_requests, 100);
        assert!(!RateLimitSettings::default().limiter_config(false).enabled);
    }

    #[test]
    fn test_zero_limits_rejected() {
        let settings = RateLimitSettings {
            max_requests: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
