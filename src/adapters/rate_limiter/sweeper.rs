//! Background task that evicts expired rate limit windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ports::RateLimiter;

/// Spawns a task calling [`RateLimiter::sweep`] every `interval`.
///
/// The task ends when `shutdown` receives `true` or its sender is dropped.
pub fn spawn_sweeper(
    limiter: Arc<dyn RateLimiter>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing can have expired yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = limiter.sweep().await {
                        tracing::warn!(error = %e, "Rate limit sweep failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Rate limit sweeper stopped");
                        break;
                    }
                }
            }
        }
    })
}
