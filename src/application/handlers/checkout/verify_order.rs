//! VerifyOrderHandler - Query handler checking an order can be paid.

use std::sync::Arc;

use crate::application::retry::{with_retry, RetryPolicy};
use crate::domain::foundation::{CheckoutError, OrderId};
use crate::domain::order::{VerifyOrderRequest, VerifyOrderResponse};
use crate::ports::OrderApi;

#[derive(Debug, Clone)]
pub struct VerifyOrderQuery {
    pub order_id: String,
}

pub struct VerifyOrderHandler {
    orders: Arc<dyn OrderApi>,
}

impl VerifyOrderHandler {
    pub fn new(orders: Arc<dyn OrderApi>) -> Self {
        Self { orders }
    }

    /// An upstream `valid: false` is returned as data, not as an error.
    pub async fn handle(&self, query: VerifyOrderQuery) -> Result<VerifyOrderResponse, CheckoutError> {
        let order_id = OrderId::new(query.order_id)?;
        let request = VerifyOrderRequest {
            order_id: order_id.to_string(),
        };
        let response = with_retry(RetryPolicy::ORDER, "verify_order", || {
            self.orders.verify_order(&request)
        })
        .await?;

        if !response.valid {
            tracing::info!(
                order_id = %order_id,
                reason = response.error.as_deref().unwrap_or("unspecified"),
                "Order failed verification"
            );
        }
        Ok(response)
    }
}
