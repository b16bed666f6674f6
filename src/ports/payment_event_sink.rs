//! Port through which verified webhook outcomes leave this service.
//!
//! The order management system updates payment state, sends receipts and
//! completes orders; this service only reports what Paystack told it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::webhook::WebhookData;

#[async_trait]
pub trait PaymentEventSink: Send + Sync {
    /// A charge succeeded. Errors make the webhook fail so Paystack retries.
    async fn payment_succeeded(&self, data: &WebhookData) -> Result<(), PaymentEventError>;

    /// A charge failed. Errors are logged by the caller and not surfaced.
    async fn payment_failed(&self, data: &WebhookData) -> Result<(), PaymentEventError>;
}

/// Errors reported by a payment event sink.
#[derive(Debug, Clone, Error)]
pub enum PaymentEventError {
    #[error("event sink unavailable: {0}")]
    Unavailable(String),

    #[error("event rejected: {0}")]
    Rejected(String),
}
