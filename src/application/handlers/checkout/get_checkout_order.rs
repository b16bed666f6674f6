//! GetCheckoutOrderHandler - Query handler resolving a QR code to an order.

use serde::Serialize;
use std::sync::Arc;

use crate::application::retry::{with_retry, RetryPolicy};
use crate::domain::crypto::OrderIdCipher;
use crate::domain::foundation::{messages, CheckoutError, OrderId, ValidationError};
use crate::domain::order::Order;
use crate::domain::validation::validate_encrypted_order_id;
use crate::ports::OrderApi;

/// Query carrying the encrypted id from the QR code.
#[derive(Debug, Clone)]
pub struct GetCheckoutOrderQuery {
    pub encrypted_id: String,
}

/// Order as presented on the checkout page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrderSummary {
    pub order: Order,
    pub currency: String,
    pub item_count: u32,
    pub is_paid: bool,
}

impl From<Order> for CheckoutOrderSummary {
    fn from(order: Order) -> Self {
        Self {
            currency: order.currency_or_default().to_string(),
            item_count: order.item_count(),
            is_paid: order.is_paid(),
            order,
        }
    }
}

/// Resolves an encrypted order id to an order summary.
///
/// With a cipher the id is decrypted locally and the private order
/// endpoint is used. Without one the encrypted id goes to the public
/// endpoint, which decrypts server-side.
pub struct GetCheckoutOrderHandler {
    orders: Arc<dyn OrderApi>,
    cipher: Option<Arc<OrderIdCipher>>,
    retry: RetryPolicy,
}

impl GetCheckoutOrderHandler {
    pub fn new(orders: Arc<dyn OrderApi>, cipher: Option<Arc<OrderIdCipher>>) -> Self {
        Self {
            orders,
            cipher,
            retry: RetryPolicy::ORDER,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn handle(
        &self,
        query: GetCheckoutOrderQuery,
    ) -> Result<CheckoutOrderSummary, CheckoutError> {
        let encrypted = query.encrypted_id.trim();
        if !validate_encrypted_order_id(encrypted) {
            return Err(
                ValidationError::invalid_format("orderId", messages::INVALID_ORDER_ID).into(),
            );
        }

        let order = match &self.cipher {
            Some(cipher) => {
                let decrypted = cipher.decrypt(encrypted).map_err(|e| {
                    tracing::warn!(error = %e, "Order id decryption failed");
                    e
                })?;
                let order_id = OrderId::new(decrypted)?;
                tracing::debug!(order_id = %order_id, "Order id decrypted");

                with_retry(self.retry, "get_order", || self.orders.get_order(&order_id)).await?
            }
            None => {
                with_retry(self.retry, "get_public_order", || {
                    self.orders.get_public_order(encrypted)
                })
                .await?
            }
        };

        tracing::info!(
            order_id = %order.id,
            payment_status = %order.payment_status,
            total = order.total,
            "Checkout order loaded"
        );
        Ok(order.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{server_error, StubOrderApi};
    use crate::domain::foundation::EncryptionError;
    use crate::ports::ApiError;

    const KEY: &str = "000102030405060708090a0b0c0d0e0f";
    const IV: &str = "0f0e0d0c0b0a09080706050403020100";
    const ORDER_ID: &str = "2b1c6a0e-8d0f-4a55-9c1e-3f1f5d1f0a11";

    fn cipher() -> Arc<OrderIdCipher> {
        Arc::new(OrderIdCipher::new(KEY, IV).unwrap())
    }

    fn query(encrypted_id: &str) -> GetCheckoutOrderQuery {
        GetCheckoutOrderQuery {
            encrypted_id: encrypted_id.to_string(),
        }
    }

    #[tokio::test]
    async fn decrypts_and_fetches_private_order() {
        let api = Arc::new(StubOrderApi::pending());
        let handler = GetCheckoutOrderHandler::new(api.clone(), Some(cipher()));
        let encrypted = cipher().encrypt(ORDER_ID).unwrap();

        let summary = handler.handle(query(&encrypted)).await.unwrap();

        assert_eq!(api.last_call(), Some(format!("get_order:{}", ORDER_ID)));
        assert_eq!(summary.currency, "NGN");
        assert_eq!(summary.item_count, 2);
        assert!(!summary.is_paid);
    }

    #[tokio::test]
    async fn without_cipher_uses_public_endpoint() {
        let api = Arc::new(StubOrderApi::paid());
        let handler = GetCheckoutOrderHandler::new(api.clone(), None);

        let summary = handler.handle(query("a1b2c3d4")).await.unwrap();

        assert_eq!(api.last_call(), Some("get_public_order:a1b2c3d4".to_string()));
        assert!(summary.is_paid);
    }

    #[tokio::test]
    async fn non_hex_id_is_rejected_without_calls() {
        let api = Arc::new(StubOrderApi::pending());
        let handler = GetCheckoutOrderHandler::new(api.clone(), Some(cipher()));

        let err = handler.handle(query("not-hex!")).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn undecryptable_id_is_an_encryption_error() {
        let api = Arc::new(StubOrderApi::pending());
        let handler = GetCheckoutOrderHandler::new(api.clone(), Some(cipher()));

        // Valid hex, but shorter than one cipher block.
        let err = handler.handle(query("abcd")).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Encryption(_)));
        assert_eq!(err.user_message(), messages::DECRYPTION_FAILED);
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried() {
        let api = Arc::new(StubOrderApi::pending().failing(2, server_error()));
        let handler = GetCheckoutOrderHandler::new(api.clone(), None);

        assert!(handler.handle(query("abcd")).await.is_ok());
        assert_eq!(api.calls(), 3);
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let api = Arc::new(
            StubOrderApi::pending().failing(1, ApiError::from_status(404, "Order not found")),
        );
        let handler = GetCheckoutOrderHandler::new(api.clone(), None);

        let err = handler.handle(query("abcd")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(api.calls(), 1);
    }

    #[test]
    fn encryption_error_converts() {
        let err: CheckoutError = EncryptionError::MissingCredentials.into();
        assert!(!err.is_retryable());
    }
}
