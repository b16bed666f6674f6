//! Recording payment event sink for tests.
//!
//! Captures every call for assertions and can be told to fail.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::webhook::WebhookData;
use crate::ports::{PaymentEventError, PaymentEventSink};

/// Which sink method received an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedOutcome {
    Succeeded,
    Failed,
}

/// In-memory sink that records calls.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned; not for production use.
#[derive(Debug, Default)]
pub struct InMemoryPaymentEventSink {
    recorded: Mutex<Vec<(RecordedOutcome, String)>>,
    fail_with: Mutex<Option<String>>,
}

impl InMemoryPaymentEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call return `Unavailable(message)`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().expect("sink lock poisoned") = Some(message.into());
    }

    /// All recorded `(outcome, reference)` pairs in call order.
    pub fn recorded(&self) -> Vec<(RecordedOutcome, String)> {
        self.recorded.lock().expect("sink lock poisoned").clone()
    }

    /// References passed to `payment_succeeded`.
    pub fn succeeded_references(&self) -> Vec<String> {
        self.references_for(RecordedOutcome::Succeeded)
    }

    /// References passed to `payment_failed`.
    pub fn failed_references(&self) -> Vec<String> {
        self.references_for(RecordedOutcome::Failed)
    }

    fn references_for(&self, outcome: RecordedOutcome) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter(|(o, _)| *o == outcome)
            .map(|(_, r)| r)
            .collect()
    }

    fn record(&self, outcome: RecordedOutcome, data: &WebhookData) -> Result<(), PaymentEventError> {
        self.recorded
            .lock()
            .expect("sink lock poisoned")
            .push((outcome, data.reference.clone()));
        match self.fail_with.lock().expect("sink lock poisoned").clone() {
            Some(message) => Err(PaymentEventError::Unavailable(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentEventSink for InMemoryPaymentEventSink {
    async fn payment_succeeded(&self, data: &WebhookData) -> Result<(), PaymentEventError> {
        self.record(RecordedOutcome::Succeeded, data)
    }

    async fn payment_failed(&self, data: &WebhookData) -> Result<(), PaymentEventError> {
        self.record(RecordedOutcome::Failed, data)
    }
}
