//! Payment service port.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::foundation::OrderId;
use crate::domain::order::{
    InitializePaymentRequest, InitializePaymentResponse, PaymentStatusPollingResponse,
    VerifyOrderRequest, VerifyOrderResponse,
};

/// Port for the payment service that fronts Paystack.
///
/// Initialization is idempotent on the service side; callers may retry.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    /// Start a payment and obtain the hosted checkout URL.
    async fn initialize_payment(
        &self,
        request: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, ApiError>;

    /// Current payment status for an order; polled until completion.
    async fn get_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusPollingResponse, ApiError>;

    async fn verify_order(
        &self,
        request: &VerifyOrderRequest,
    ) -> Result<VerifyOrderResponse, ApiError>;
}
