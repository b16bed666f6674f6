//! In-memory payment history store for tests and single-process use.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::history::PaymentRecord;
use crate::ports::{HistoryError, PaymentHistoryStore};

#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    records: Arc<RwLock<Vec<PaymentRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentHistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<Vec<PaymentRecord>, HistoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[PaymentRecord]) -> Result<(), HistoryError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.records.write().await.clear();
        Ok(())
    }
}
