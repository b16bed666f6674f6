//! Payment status queries.
//!
//! The payment service answers the lightweight status used while a
//! customer waits; the order API answers the detailed record with split
//! amounts and webhook verification flags.

use std::sync::Arc;

use crate::application::retry::{with_retry, RetryPolicy};
use crate::domain::foundation::{CheckoutError, OrderId};
use crate::domain::order::{PaymentStatusPollingResponse, PaymentStatusResponse};
use crate::ports::{OrderApi, PaymentApi};

#[derive(Debug, Clone)]
pub struct GetPaymentStatusQuery {
    pub order_id: String,
}

pub struct GetPaymentStatusHandler {
    payments: Arc<dyn PaymentApi>,
    orders: Arc<dyn OrderApi>,
}

impl GetPaymentStatusHandler {
    pub fn new(payments: Arc<dyn PaymentApi>, orders: Arc<dyn OrderApi>) -> Self {
        Self { payments, orders }
    }

    pub async fn handle(
        &self,
        query: GetPaymentStatusQuery,
    ) -> Result<PaymentStatusPollingResponse, CheckoutError> {
        let order_id = OrderId::new(query.order_id)?;
        let status = with_retry(RetryPolicy::PAYMENT_STATUS, "get_payment_status", || {
            self.payments.get_payment_status(&order_id)
        })
        .await?;

        tracing::debug!(order_id = %order_id, status = %status.status, "Payment status fetched");
        Ok(status)
    }

    /// Detailed status as recorded by the order system.
    pub async fn handle_detailed(
        &self,
        query: GetPaymentStatusQuery,
    ) -> Result<PaymentStatusResponse, CheckoutError> {
        let order_id = OrderId::new(query.order_id)?;
        let status = with_retry(RetryPolicy::PAYMENT_STATUS, "get_order_payment_status", || {
            self.orders.get_payment_status(&order_id)
        })
        .await?;

        tracing::debug!(
            order_id = %order_id,
            status = %status.payment_status,
            webhook_verified = status.webhook_verified.unwrap_or(false),
            "Order payment status fetched"
        );
        Ok(status)
    }
}
