//! Persistence port for the local payment log.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::history::PaymentRecord;

/// Stores the whole payment log as one unit, newest record first.
#[async_trait]
pub trait PaymentHistoryStore: Send + Sync {
    /// Loads all records. An absent log is an empty list, not an error.
    async fn load(&self) -> Result<Vec<PaymentRecord>, HistoryError>;

    /// Replaces the stored log.
    async fn save(&self, records: &[PaymentRecord]) -> Result<(), HistoryError>;

    /// Deletes the stored log.
    async fn clear(&self) -> Result<(), HistoryError>;
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}
