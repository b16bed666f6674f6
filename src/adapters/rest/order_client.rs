//! HTTP client for the upstream order API.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::OrderId;
use crate::domain::order::{
    Order, PaymentLinkResponse, PaymentStatusResponse, VerifyOrderRequest, VerifyOrderResponse,
};
use crate::ports::{ApiError, OrderApi};

use super::error::{decode_response, transport_error};

const NO_RESPONSE: &str = "No response from server";

/// Default request timeout for the order API.
pub const ORDER_API_TIMEOUT: Duration = Duration::from_secs(10);

/// `OrderApi` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct OrderApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OrderApiClient {
    /// Creates a client for `base_url` with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, base_url))
    }

    /// Uses an existing `reqwest::Client` (shared connection pool).
    pub fn with_client(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http_client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport_error(e, NO_RESPONSE))?;
        decode_response(response, NO_RESPONSE).await
    }
}

#[async_trait]
impl OrderApi for OrderApiClient {
    async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        tracing::debug!(order_id = %order_id, "Fetching order");
        self.get(&format!("/orders/{}", order_id)).await
    }

    async fn get_public_order(&self, encrypted_id: &str) -> Result<Order, ApiError> {
        self.get(&format!("/payments/public/orders/{}", encrypted_id))
            .await
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

    async fn get_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ApiError> {
        self.get(&format!("/orders/{}/payment-status", order_id))
            .await
    }

    async fn get_payment_link(&self, order_id: &OrderId) -> Result<PaymentLinkResponse, ApiError> {
        self.get(&format!("/orders/{}/payment-link", order_id)).await
    }
}
