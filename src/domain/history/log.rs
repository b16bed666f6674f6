//! Newest-first payment log, bounded per customer.
//!
//! Every customer keeps their own most recent payments. One busy customer
//! never evicts another customer's pending record.

use serde::Serialize;
use std::collections::HashMap;

use super::record::{PaymentRecord, PaymentRecordStatus};
use crate::domain::foundation::PaymentRecordId;

/// Records kept per customer; that customer's oldest entries fall off.
pub const MAX_RECORDS_PER_CUSTOMER: usize = 100;

const CSV_HEADER: &str = "ID,Order ID,Amount,Currency,Status,Reference,Email,Date";

/// Aggregate figures over the log.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatistics {
    pub total_transactions: usize,
    pub successful_transactions: usize,
    pub failed_transactions: usize,
    /// Sum over successful records only.
    pub total_amount: f64,
    /// Mean over successful records; 0 when there are none.
    pub average_amount: f64,
}

/// In-memory view of the payment log. Index 0 is the newest record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentLog {
    records: Vec<PaymentRecord>,
}

impl PaymentLog {
    pub fn new(records: Vec<PaymentRecord>) -> Self {
        let mut log = Self { records };
        log.enforce_bound();
        log
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PaymentRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts at the front, dropping the customer's entries beyond the cap.
    pub fn push(&mut self, record: PaymentRecord) {
        self.records.insert(0, record);
        self.enforce_bound();
    }

    /// The customer's own records, newest first.
    pub fn for_customer(&self, email: &str) -> PaymentLog {
        let key = customer_key(email);
        PaymentLog {
            records: self
                .records
                .iter()
                .filter(|r| customer_key(&r.customer_email) == key)
                .cloned()
                .collect(),
        }
    }

    /// Drops every record of the customer; returns how many went.
    pub fn remove_customer(&mut self, email: &str) -> usize {
        let key = customer_key(email);
        let before = self.records.len();
        self.records
            .retain(|r| customer_key(&r.customer_email) != key);
        before - self.records.len()
    }

    fn enforce_bound(&mut self) {
        let mut seen: HashMap<String, usize> = HashMap::new();
        self.records.retain(|r| {
            let count = seen.entry(customer_key(&r.customer_email)).or_insert(0);
            *count += 1;
            *count <= MAX_RECORDS_PER_CUSTOMER
        });
    }

    /// Newest record for the order.
    pub fn find_by_order_id(&self, order_id: &str) -> Option<&PaymentRecord> {
        self.records.iter().find(|r| r.order_id == order_id)
    }

    pub fn find_by_reference(&self, reference: &str) -> Option<&PaymentRecord> {
        self.records.iter().find(|r| r.reference == reference)
    }

    /// Sets the status of the record with `id`; returns the updated record.
    pub fn update_status(
        &mut self,
        id: &PaymentRecordId,
        status: PaymentRecordStatus,
    ) -> Option<&PaymentRecord> {
        let record = self.records.iter_mut().find(|r| &r.id == id)?;
        record.status = status;
        Some(record)
    }

    pub fn statistics(&self) -> PaymentStatistics {
        let successful: Vec<&PaymentRecord> = self
            .records
            .iter()
            .filter(|r| r.status == PaymentRecordStatus::Success)
            .collect();
        let failed = self
            .records
            .iter()
            .filter(|r| r.status == PaymentRecordStatus::Failed)
            .count();
        let total_amount: f64 = successful.iter().map(|r| r.amount).sum();
        let average_amount = if successful.is_empty() {
            0.0
        } else {
            total_amount / successful.len() as f64
        };

        PaymentStatistics {
            total_transactions: self.records.len(),
            successful_transactions: successful.len(),
            failed_transactions: failed,
            total_amount,
            average_amount,
        }
    }

    /// CSV export with every cell double-quoted.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.records.len() + 1);
        lines.push(CSV_HEADER.to_string());
        for r in &self.records {
            let cells = [
                r.id.to_string(),
                r.order_id.clone(),
                r.amount.to_string(),
                r.currency.clone(),
                r.status.to_string(),
                r.reference.clone(),
                r.customer_email.clone(),
                r.timestamp.clone(),
            ];
            let row: Vec<String> = cells.iter().map(|c| quote(c)).collect();
            lines.push(row.join(","));
        }
        lines.join("\n")
    }
}

fn customer_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
