//! Order API port.
//!
//! The order management system owns orders; this service only reads them
//! and asks for payment metadata.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::foundation::OrderId;
use crate::domain::order::{
    Order, PaymentLinkResponse, PaymentStatusResponse, VerifyOrderRequest, VerifyOrderResponse,
};

/// Port for the upstream order API.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Fetch an order by its decrypted id.
    async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError>;

    /// Fetch an order by the encrypted id from the QR code.
    ///
    /// The order API decrypts server-side; used when this service has no
    /// cipher configured.
    async fn get_public_order(&self, encrypted_id: &str) -> Result<Order, ApiError>;

    /// Check that an order exists and can be paid.
    async fn verify_order(
        &self,
        request: &VerifyOrderRequest,
    ) -> Result<VerifyOrderResponse, ApiError>;

    /// Payment status as recorded by the order system.
    async fn get_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ApiError>;

    /// Shareable payment link and QR code for an order.
    async fn get_payment_link(&self, order_id: &OrderId) -> Result<PaymentLinkResponse, ApiError>;
}
