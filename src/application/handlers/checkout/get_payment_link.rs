//! GetPaymentLinkHandler - Query handler for shareable payment links.

use std::sync::Arc;

use crate::application::retry::{with_retry, RetryPolicy};
use crate::domain::foundation::{CheckoutError, OrderId};
use crate::domain::order::PaymentLinkResponse;
use crate::ports::OrderApi;

#[derive(Debug, Clone)]
pub struct GetPaymentLinkQuery {
    pub order_id: String,
}

pub struct GetPaymentLinkHandler {
    orders: Arc<dyn OrderApi>,
}

impl GetPaymentLinkHandler {
    pub fn new(orders: Arc<dyn OrderApi>) -> Self {
        Self { orders }
    }

    pub async fn handle(
        &self,
        query: GetPaymentLinkQuery,
    ) -> Result<PaymentLinkResponse, CheckoutError> {
        let order_id = OrderId::new(query.order_id)?;
        let link = with_retry(RetryPolicy::PAYMENT_LINK, "get_payment_link", || {
            self.orders.get_payment_link(&order_id)
        })
        .await?;
        Ok(link)
    }
}
