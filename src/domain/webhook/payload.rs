//! Paystack webhook payload.
//!
//! The envelope keeps `data` as raw JSON. Paystack sends many event types
//! with different `data` shapes, and only charge outcomes are read as
//! [`WebhookData`]; everything else is acknowledged untouched.

use serde::{Deserialize, Serialize};

use super::errors::WebhookError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl WebhookPayload {
    /// `data.reference` when the event carries one, whatever its shape.
    pub fn reference(&self) -> Option<&str> {
        self.data.get("reference").and_then(|r| r.as_str())
    }

    /// Reads `data` as a charge outcome.
    pub fn charge_data(&self) -> Result<WebhookData, WebhookError> {
        WebhookData::deserialize(&self.data)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookData {
    pub id: i64,
    pub reference: String,
    /// Amount in the currency's minor unit (kobo for NGN).
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
    pub customer: WebhookCustomer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<CardAuthorization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookCustomer {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub customer_code: String,
}

/// Card metadata attached to a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAuthorization {
    pub authorization_code: String,
    #[serde(default)]
    pub bin: String,
    #[serde(default)]
    pub last4: String,
    #[serde(default)]
    pub exp_month: String,
    #[serde(default)]
    pub exp_year: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub card_type: String,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub reusable: bool,
    #[serde(default)]
    pub signature: String,
}
