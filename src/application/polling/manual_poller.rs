//! Caller-driven poller with stepped exponential backoff.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::OrderId;
use crate::domain::order::PaymentStatusPollingResponse;
use crate::domain::polling::BackoffPolicy;
use crate::ports::PaymentApi;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManualPollError {
    #[error("no order to poll")]
    NoOrder,

    #[error("payment not completed after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Polls one order until it completes or the attempt budget runs out.
///
/// The attempt counter survives between [`poll`](Self::poll) calls, so a
/// caller that polls again after exhaustion gets `Exhausted` immediately
/// until it calls [`reset`](Self::reset).
pub struct ManualPaymentPoller {
    api: Arc<dyn PaymentApi>,
    order_id: Option<OrderId>,
    policy: BackoffPolicy,
    attempts: u32,
    latest: Option<PaymentStatusPollingResponse>,
}

impl ManualPaymentPoller {
    pub fn new(api: Arc<dyn PaymentApi>, order_id: &str) -> Self {
        Self::with_policy(api, order_id, BackoffPolicy::default())
    }

    pub fn with_policy(api: Arc<dyn PaymentApi>, order_id: &str, policy: BackoffPolicy) -> Self {
        Self {
            api,
            order_id: OrderId::new(order_id).ok(),
            policy,
            attempts: 0,
            latest: None,
        }
    }

    /// Fetches until `PAYMENT_COMPLETED`, sleeping
    /// [`BackoffPolicy::delay_for`] between attempts. Fetch errors use up
    /// an attempt and polling continues.
    pub async fn poll(&mut self) -> Result<PaymentStatusPollingResponse, ManualPollError> {
        let order_id = self.order_id.clone().ok_or(ManualPollError::NoOrder)?;

        loop {
            if self.policy.is_exhausted(self.attempts) {
                tracing::warn!(
                    order_id = %order_id,
                    attempts = self.attempts,
                    "Manual payment polling exhausted"
                );
                return Err(ManualPollError::Exhausted {
                    attempts: self.attempts,
                });
            }

            self.attempts += 1;
            match self.api.get_payment_status(&order_id).await {
                Ok(status) if status.is_completed() => {
                    tracing::info!(order_id = %order_id, attempts = self.attempts, "Payment completed");
                    self.attempts = 0;
                    self.latest = Some(status.clone());
                    return Ok(status);
                }
                Ok(status) => self.latest = Some(status),
                Err(e) => {
                    tracing::debug!(
                        order_id = %order_id,
                        attempt = self.attempts,
                        error = %e,
                        "Payment status fetch failed"
                    );
                }
            }

            if self.policy.is_exhausted(self.attempts) {
                continue;
            }
            tokio::time::sleep(self.policy.delay_for(self.attempts)).await;
        }
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.policy.max_attempts
    }

    pub fn latest(&self) -> Option<&PaymentStatusPollingResponse> {
        self.latest.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{server_error, status, ScriptedPaymentApi};
    use std::time::Duration;
    use tokio::time::Instant;

    fn policy(max_attempts: u32) -> BackoffPolicy {
        BackoffPolicy {
            max_attempts,
            ..BackoffPolicy::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_on_completion_and_resets_counter() {
        let api = Arc::new(ScriptedPaymentApi::new(vec![
            Ok(status("o1", "PENDING")),
            Ok(status("o1", "PENDING")),
            Ok(status("o1", "PAYMENT_COMPLETED")),
        ]));
        let mut poller = ManualPaymentPoller::new(api.clone(), "o1");

        let status = poller.poll().await.unwrap();
        assert!(status.is_completed());
        assert_eq!(poller.attempts(), 0);
        assert_eq!(api.status_calls(), 3);
        assert!(poller.latest().unwrap().is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_doubles_every_five_attempts() {
        let api = Arc::new(ScriptedPaymentApi::always("PENDING"));
        let mut poller = ManualPaymentPoller::with_policy(api.clone(), "o1", policy(11));
        let started = Instant::now();

        let err = poller.poll().await.unwrap_err();
        assert_eq!(err, ManualPollError::Exhausted { attempts: 11 });

        // Delays after attempts 1..=10: four of 1s, five of 2s, one of 4s.
        assert_eq!(started.elapsed(), Duration::from_secs(4 + 10 + 4));
        assert_eq!(api.status_calls(), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn errors_use_up_attempts_but_keep_polling() {
        let api = Arc::new(ScriptedPaymentApi::new(vec![
            Err(server_error()),
            Err(server_error()),
            Ok(status("o1", "PAYMENT_COMPLETED")),
        ]));
        let mut poller = ManualPaymentPoller::new(api.clone(), "o1");

        assert!(poller.poll().await.is_ok());
        assert_eq!(api.status_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_poller_stays_exhausted_until_reset() {
        let api = Arc::new(ScriptedPaymentApi::always("PENDING"));
        let mut poller = ManualPaymentPoller::with_policy(api.clone(), "o1", policy(3));

        assert!(poller.poll().await.is_err());
        assert_eq!(api.status_calls(), 3);

        assert_eq!(
            poller.poll().await,
            Err(ManualPollError::Exhausted { attempts: 3 })
        );
        assert_eq!(api.status_calls(), 3);

        poller.reset();
        assert_eq!(poller.attempts(), 0);
        assert!(poller.poll().await.is_err());
        assert_eq!(api.status_calls(), 6);
    }

    #[tokio::test]
    async fn empty_order_id_does_nothing() {
        let api = Arc::new(ScriptedPaymentApi::always("PAYMENT_COMPLETED"));
        let mut poller = ManualPaymentPoller::new(api.clone(), "");

        assert_eq!(poller.poll().await, Err(ManualPollError::NoOrder));
        assert_eq!(api.status_calls(), 0);
        assert_eq!(poller.max_attempts(), 100);
    }
}
