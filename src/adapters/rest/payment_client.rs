//! HTTP client for the payment service.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::OrderId;
use crate::domain::order::{
    InitializePaymentRequest, InitializePaymentResponse, PaymentStatusPollingResponse,
    VerifyOrderRequest, VerifyOrderResponse,
};
use crate::ports::{ApiError, PaymentApi};

use super::error::{decode_response, transport_error};

const NO_RESPONSE: &str = "No response from payment service";

/// Default request timeout for the payment service.
pub const PAYMENT_API_TIMEOUT: Duration = Duration::from_secs(15);

/// `PaymentApi` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct PaymentServiceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl PaymentServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, base_url))
    }

    pub fn with_client(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PaymentApi for PaymentServiceClient {
    async fn initialize_payment(
        &self,
        request: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, ApiError> {
        tracing::info!(order_id = %request.order_id, "Initializing payment");
        let response = self
            .http_client
            .post(self.url("/api/payments/initialize"))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(e, NO_RESPONSE))?;
        decode_response(response, NO_RESPONSE).await
    }

    async fn get_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusPollingResponse, ApiError> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/payments/{}/status", order_id)))
            .send()
            .await
            .map_err(|e| transport_error(e, NO_RESPONSE))?;
        decode_response(response, NO_RESPONSE).await
    }

    async fn verify_order(
        &self,
        request: &VerifyOrderRequest,
    ) -> Result<VerifyOrderResponse, ApiError> {
        let response = self
            .http_client
            .post(self.url("/api/orders/verify"))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(e, NO_RESPONSE))?;
        decode_response(response, NO_RESPONSE).await
    }
}
