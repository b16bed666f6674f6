//! ProcessWebhookHandler - Command handler for Paystack webhooks.
//!
//! Checks run in a fixed order: rate limit, signature header, signature,
//! payload, dispatch. Nothing reaches the event sink unless every earlier
//! step passed.

use std::sync::Arc;

use crate::application::history::PaymentHistoryService;
use crate::domain::foundation::Timestamp;
use crate::domain::history::PaymentRecordStatus;
use crate::domain::webhook::{
    PaystackWebhookVerifier, WebhookData, WebhookError, WebhookEventKind, WebhookPayload,
};
use crate::ports::{PaymentEventSink, RateLimitKey, RateLimiter};

/// Command to process one webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of `x-paystack-signature`, if present.
    pub signature: Option<String>,
    /// Client address used for rate limiting.
    pub client_ip: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessWebhookResult {
    /// Success handler completed.
    PaymentSucceeded { reference: String },
    /// Failure handler ran; `handler_error` holds a swallowed error.
    PaymentFailed {
        reference: String,
        handler_error: Option<String>,
    },
    /// Event acknowledged without action.
    Ignored { event: String },
}

/// Handler for Paystack webhook deliveries.
pub struct ProcessWebhookHandler {
    verifier: PaystackWebhookVerifier,
    rate_limiter: Arc<dyn RateLimiter>,
    event_sink: Arc<dyn PaymentEventSink>,
    history: Option<Arc<PaymentHistoryService>>,
}

impl ProcessWebhookHandler {
    pub fn new(
        verifier: PaystackWebhookVerifier,
        rate_limiter: Arc<dyn RateLimiter>,
        event_sink: Arc<dyn PaymentEventSink>,
    ) -> Self {
        Self {
            verifier,
            rate_limiter,
            event_sink,
            history: None,
        }
    }

    /// Also mark matching payment history records on success/failure.
    pub fn with_history(mut self, history: Arc<PaymentHistoryService>) -> Self {
        self.history = Some(history);
        self
    }

    pub async fn handle(
        &self,
        cmd: ProcessWebhookCommand,
    ) -> Result<ProcessWebhookResult, WebhookError> {
        // 1. Rate limit
        self.enforce_rate_limit(&cmd.client_ip).await?;

        // 2. Signature header
        let signature = cmd
            .signature
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                tracing::warn!(client_ip = %cmd.client_ip, "Missing webhook signature");
                WebhookError::MissingSignature
            })?;

        // 3-4. Signature, then payload
        let payload = self
            .verifier
            .verify_and_parse(&cmd.payload, signature)
            .map_err(|e| {
                match &e {
                    WebhookError::MalformedPayload(reason) => {
                        tracing::error!(error = %reason, "Webhook payload could not be parsed")
                    }
                    _ => tracing::warn!(client_ip = %cmd.client_ip, "Invalid webhook signature"),
                }
                e
            })?;

        tracing::info!(
            event = %payload.event,
            reference = payload.reference().unwrap_or_default(),
            "Webhook received"
        );

        // 5. Dispatch; `data` is only read as a charge for charge outcomes
        match WebhookEventKind::classify(&payload.event) {
            WebhookEventKind::PaymentSucceeded => {
                let data = self.charge_data(&payload)?;
                self.handle_payment_success(&data).await
            }
            WebhookEventKind::PaymentFailed => {
                let data = self.charge_data(&payload)?;
                Ok(self.handle_payment_failed(&data).await)
            }
            WebhookEventKind::Unhandled(event) => {
                tracing::debug!(event = %event, "Unhandled webhook event");
                Ok(ProcessWebhookResult::Ignored { event })
            }
        }
    }

    fn charge_data(&self, payload: &WebhookPayload) -> Result<WebhookData, WebhookError> {
        payload.charge_data().map_err(|e| {
            tracing::error!(event = %payload.event, error = %e, "Charge event data could not be parsed");
            e
        })
    }

    async fn enforce_rate_limit(&self, client_ip: &str) -> Result<(), WebhookError> {
        let key = RateLimitKey::webhook(client_ip);
        match self.rate_limiter.check(&key).await {
            Ok(decision) if decision.is_denied() => {
                tracing::warn!(client_ip = %client_ip, "Webhook rate limit exceeded");
                Err(WebhookError::RateLimited {
                    retry_after_secs: decision.retry_after_secs(Timestamp::now().as_unix_millis()),
                })
            }
            Ok(_) => Ok(()),
            Err(e) => {
                // Provider retries are cheap; losing a payment event is not.
                tracing::warn!(error = %e, "Rate limiter unavailable, allowing webhook");
                Ok(())
            }
        }
    }

    async fn handle_payment_success(
        &self,
        data: &WebhookData,
    ) -> Result<ProcessWebhookResult, WebhookError> {
        tracing::info!(
            reference = %data.reference,
            amount = data.amount,
            customer = %data.customer.email,
            "Processing payment success"
        );

        self.event_sink.payment_succeeded(data).await.map_err(|e| {
            tracing::error!(
                reference = %data.reference,
                error = %e,
                "Failed to process payment success"
            );
            WebhookError::HandlerFailed(e.to_string())
        })?;

        self.mark_history(&data.reference, PaymentRecordStatus::Success)
            .await;

        Ok(ProcessWebhookResult::PaymentSucceeded {
            reference: data.reference.clone(),
        })
    }

    /// Failure handling never fails the webhook.
    async fn handle_payment_failed(&self, data: &WebhookData) -> ProcessWebhookResult {
        tracing::warn!(
            reference = %data.reference,
            amount = data.amount,
            "Payment failed"
        );

        let handler_error = match self.event_sink.payment_failed(data).await {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(
                    reference = %data.reference,
                    error = %e,
                    "Failed to process payment failure"
                );
                Some(e.to_string())
            }
        };

        self.mark_history(&data.reference, PaymentRecordStatus::Failed)
            .await;

        ProcessWebhookResult::PaymentFailed {
            reference: data.reference.clone(),
            handler_error,
        }
    }

    async fn mark_history(&self, reference: &str, status: PaymentRecordStatus) {
        let Some(history) = &self.history else {
            return;
        };
        let Some(record) = history.by_reference(reference).await else {
            tracing::debug!(reference = %reference, "No local payment record for webhook");
            return;
        };
        if let Err(e) = history.update_status(&record.id, status).await {
            tracing::warn!(reference = %reference, error = %e, "Failed to update payment history");
        }
    }
}
