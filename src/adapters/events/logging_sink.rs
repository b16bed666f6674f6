//! Payment event sink that only logs.
//!
//! Used until an order management integration is wired in; each call marks
//! where that integration updates payment state, notifies the customer and
//! completes the order.

use async_trait::async_trait;

use crate::domain::webhook::WebhookData;
use crate::ports::{PaymentEventError, PaymentEventSink};

#[derive(Debug, Clone, Default)]
pub struct LoggingPaymentEventSink;

impl LoggingPaymentEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentEventSink for LoggingPaymentEventSink {
    async fn payment_succeeded(&self, data: &WebhookData) -> Result<(), PaymentEventError> {
        tracing::info!(
            reference = %data.reference,
            amount = data.amount,
            customer = %data.customer.email,
            order_id = data.order_id.as_deref().unwrap_or(""),
            "Payment success processed"
        );
        Ok(())
    }

    async fn payment_failed(&self, data: &WebhookData) -> Result<(), PaymentEventError> {
        tracing::info!(
            reference = %data.reference,
            amount = data.amount,
            "Payment failure processed"
        );
        Ok(())
    }
}
