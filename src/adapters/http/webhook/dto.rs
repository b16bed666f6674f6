//! Response bodies of the webhook endpoint.

use serde::{Deserialize, Serialize};

/// Body of a processed delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
}

impl WebhookAck {
    pub fn processed() -> Self {
        Self {
            success: true,
            message: "Webhook processed".to_string(),
        }
    }
}

/// Body of a rejected delivery. Carries a fixed public message only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookErrorResponse {
    pub error: String,
}

impl WebhookErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookHealthResponse {
    pub status: String,
    pub message: String,
}

impl WebhookHealthResponse {
    pub fn active(provider: &str) -> Self {
        Self {
            status: "ok".to_string(),
            message: format!("{} webhook endpoint is active", display_name(provider)),
        }
    }
}

fn display_name(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
