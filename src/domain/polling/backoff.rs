//! Poll timing parameters.

use std::time::Duration;

/// Default fetch interval for the interval poller.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3_000);

/// Default overall deadline for the interval poller.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Settings for the interval poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub enabled: bool,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Settings for the manual backoff poller.
///
/// The delay doubles every `attempts_per_step` attempts, starting at
/// `base_delay` and capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub attempts_per_step: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            base_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_millis(30_000),
            attempts_per_step: 5,
        }
    }
}

impl BackoffPolicy {
    /// Delay after `attempt` attempts: `min(base · 2^⌊attempt/step⌋, max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let step = attempt / self.attempts_per_step.max(1);
        let base = self.base_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(step).unwrap_or(u64::MAX);
        let millis = base.saturating_mul(factor);
        Duration::from_millis(millis).min(self.max_delay)
    }

    pub fn is_exhausted(&self, attempts: u32) -> bool {
        attempts >= self.max_attempts
    }
}

/// Exponential retry delay used by the REST query retries:
/// `min(1000 · 2^attempt, cap)`.
pub fn retry_delay(attempt: u32, cap: Duration) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(1_000u64.saturating_mul(factor)).min(cap)
}
