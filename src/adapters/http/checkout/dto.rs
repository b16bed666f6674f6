//! Request and response DTOs for the checkout API.
//!
//! Successful responses reuse the domain shapes, which already serialize in
//! camelCase for the checkout page.

use serde::{Deserialize, Serialize};

use crate::domain::validation::CheckoutForm;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a hosted payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentBody {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl InitializePaymentBody {
    pub fn form(&self) -> CheckoutForm {
        CheckoutForm {
            email: self.email.clone(),
            phone: self.phone.clone(),
            name: self.name.clone(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Message safe to show to the customer.
    pub message: String,
    /// Internal detail, only present with verbose errors enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_body_accepts_camel_case_with_optional_fields() {
        let body: InitializePaymentBody =
            serde_json::from_str(r#"{"email":"ada@example.com"}"#).unwrap();
        assert_eq!(body.email, "ada@example.com");
        assert!(body.phone.is_none());
        assert!(body.currency.is_none());

        let form = body.form();
        assert_eq!(form.email, "ada@example.com");
        assert!(form.name.is_none());
    }

    #[test]
    fn error_response_omits_details_by_default() {
        let json = serde_json::to_string(&ErrorResponse::new("NOT_FOUND", "Not found")).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn error_response_with_details_includes_them() {
        let response = ErrorResponse::new("NETWORK_ERROR", "Try again").with_details("timeout");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["details"], "timeout");
    }
}
