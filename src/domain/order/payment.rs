//! Request/response shapes of the payment and order collaborator APIs.

use serde::{Deserialize, Serialize};

use super::order::{Organization, PaymentStatus};

/// One observation of a payment's progress, fetched per poll tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusPollingResponse {
    pub order_id: String,
    pub status: PaymentStatus,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl PaymentStatusPollingResponse {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// Payment status as reported by the order API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub order_id: String,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paystack_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialized_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_verified_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentRequest {
    pub order_id: String,
    pub email: String,
}

/// Result of payment initialization, carrying the hosted checkout URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentResponse {
    pub checkout_url: String,
    pub session_id: String,
    pub amount: f64,
    pub idempotency_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paystack_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paystack_access_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOrderRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOrderResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkResponse {
    pub order_id: String,
    pub payment_link: String,
    pub qr_code_url: String,
    pub expires_at: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_response_detects_completion() {
        let json = r#"{"orderId":"o1","status":"PAYMENT_COMPLETED","amount":1200,"completedAt":"2024-01-15T10:35:00Z"}"#;
        let resp: PaymentStatusPollingResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_completed());
        assert_eq!(resp.completed_at.as_deref(), Some("2024-01-15T10:35:00Z"));
    }

    #[test]
    fn polling_response_pending_is_not_completed() {
        let json = r#"{"orderId":"o1","status":"PENDING","amount":1200}"#;
        let resp: PaymentStatusPollingResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.is_completed());
        assert!(resp.completed_at.is_none());
    }

    #[test]
    fn initialize_request_uses_camel_case() {
        let req = InitializePaymentRequest {
            order_id: "o1".to_string(),
            email: "ada@example.com".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"orderId":"o1","email":"ada@example.com"}"#);
    }

    #[test]
    fn initialize_response_optional_fields() {
        let json = r#"{"checkoutUrl":"https://checkout.paystack.com/abc","sessionId":"s1","amount":5375,"idempotencyKey":"k1"}"#;
        let resp: InitializePaymentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.checkout_url, "https://checkout.paystack.com/abc");
        assert!(resp.paystack_reference.is_none());
    }

    #[test]
    fn verify_response_invalid_order() {
        let json = r#"{"valid":false,"error":"Order not found"}"#;
        let resp: VerifyOrderResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.valid);
        assert_eq!(resp.error.as_deref(), Some("Order not found"));
    }
}
