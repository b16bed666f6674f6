//! Payment history records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{PaymentRecordId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentRecordStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl PaymentRecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentRecordStatus::Pending => "pending",
            PaymentRecordStatus::Success => "success",
            PaymentRecordStatus::Failed => "failed",
            PaymentRecordStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the local payment log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: PaymentRecordId,
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentRecordStatus,
    pub reference: String,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub payment_method: String,
    /// ISO-8601 creation time.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Everything a caller supplies when logging a payment; id and timestamp
/// are assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentRecord {
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentRecordStatus,
    pub reference: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub payment_method: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl NewPaymentRecord {
    pub fn into_record(self, now: Timestamp) -> PaymentRecord {
        PaymentRecord {
            id: PaymentRecordId::generate(now.as_unix_millis()),
            order_id: self.order_id,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            reference: self.reference,
            customer_email: self.customer_email,
            customer_name: self.customer_name,
            payment_method: self.payment_method,
            timestamp: now.to_rfc3339(),
            metadata: self.metadata,
        }
    }
}
