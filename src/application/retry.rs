//! Retry with exponential backoff for upstream queries.

use std::future::Future;
use std::time::Duration;

use crate::domain::polling::retry_delay;
use crate::ports::ApiError;

/// How often and how patiently a query is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Order fetch and order verification.
    pub const ORDER: RetryPolicy = RetryPolicy {
        max_retries: 3,
        max_delay: Duration::from_secs(30),
    };

    /// Payment status lookups.
    pub const PAYMENT_STATUS: RetryPolicy = RetryPolicy {
        max_retries: 2,
        max_delay: Duration::from_secs(10),
    };

    /// Payment link lookups.
    pub const PAYMENT_LINK: RetryPolicy = RetryPolicy {
        max_retries: 2,
        max_delay: Duration::from_secs(30),
    };

    /// Single attempt.
    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        max_delay: Duration::ZERO,
    };
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// policy's retries are used up. Attempt `n` (0-based) waits
/// `min(1s · 2^n, max_delay)` before the next try.
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                let delay = retry_delay(attempt, policy.max_delay);
                tracing::warn!(
                    operation,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Upstream call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
