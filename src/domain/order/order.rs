//! Order snapshot as served by the upstream order API.
//!
//! Orders are created elsewhere; this service only reads them, so every
//! type here is a plain deserializable view.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment status of an order.
///
/// Unknown upstream values are kept verbatim in `Other` so a new status
/// never breaks deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    PaymentInitialized,
    PaymentCompleted,
    Failed,
    Cancelled,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::PaymentInitialized => "PAYMENT_INITIALIZED",
            PaymentStatus::PaymentCompleted => "PAYMENT_COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Other(s) => s,
        }
    }

    /// Completed, failed and cancelled orders will not change again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentStatus::PaymentCompleted | PaymentStatus::Failed | PaymentStatus::Cancelled
        )
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, PaymentStatus::PaymentCompleted)
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => PaymentStatus::Pending,
            "PAYMENT_INITIALIZED" => PaymentStatus::PaymentInitialized,
            "PAYMENT_COMPLETED" => PaymentStatus::PaymentCompleted,
            "FAILED" => PaymentStatus::Failed,
            "CANCELLED" => PaymentStatus::Cancelled,
            _ => PaymentStatus::Other(s),
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        PaymentStatus::from(s.to_string())
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub organization_id: String,
    pub order_number: String,
    pub status: String,
    pub payment_status: PaymentStatus,
    pub total: f64,
    pub subtotal: f64,
    pub tax: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub organization: Organization,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Order {
    /// Currency code, defaulting to naira.
    pub fn currency_or_default(&self) -> &str {
        self.currency.as_deref().unwrap_or("NGN")
    }

    /// Number of individual units across all line items.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status.is_completed()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<OrderModifier>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderModifier {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Restaurant that owns the order, with its payment split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub paystack_public_key: String,
    pub paystack_subaccount_id: String,
    pub payment_split_percentage: f64,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_parses_known_values() {
        assert_eq!(PaymentStatus::from("PENDING"), PaymentStatus::Pending);
        assert_eq!(
            PaymentStatus::from("PAYMENT_COMPLETED"),
            PaymentStatus::PaymentCompleted
        );
        assert_eq!(PaymentStatus::from("FAILED"), PaymentStatus::Failed);
    }

    #[test]
    fn payment_status_keeps_unknown_values() {
        let status = PaymentStatus::from("REFUNDED");
        assert_eq!(status, PaymentStatus::Other("REFUNDED".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"REFUNDED\"");
    }

    #[test]
    fn terminal_statuses() {
        assert!(PaymentStatus::PaymentCompleted.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Cancelled.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::PaymentInitialized.is_terminal());
    }

    #[test]
    fn order_deserializes_from_camel_case() {
        let order = fixtures::order("PENDING");
        assert_eq!(order.order_number, "ORD-0042");
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.currency_or_default(), "NGN");
        assert!(order.customer.is_none());
        assert!(!order.is_paid());
    }

    #[test]
    fn order_serializes_back_to_camel_case() {
        let order = fixtures::order("PAYMENT_COMPLETED");
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["paymentStatus"], "PAYMENT_COMPLETED");
        assert_eq!(json["organization"]["paystackPublicKey"], "pk_test_abc");
        assert!(json.get("discount").is_none());
    }
}
