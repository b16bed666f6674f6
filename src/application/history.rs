//! Payment history service over a [`PaymentHistoryStore`].

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{PaymentRecordId, Timestamp};
use crate::domain::history::{
    NewPaymentRecord, PaymentLog, PaymentRecord, PaymentRecordStatus, PaymentStatistics,
};
use crate::ports::{HistoryError, PaymentHistoryStore};

/// Reads and updates the payment log.
///
/// Reads never fail: an unreadable store yields an empty history and a log
/// line. Writes load the stored log first and give up when that load fails,
/// so a read error never overwrites what is on disk. Writes are serialized
/// so concurrent updates do not lose records.
///
/// Listing, statistics, export and clearing are scoped to one customer's
/// email; nothing here returns another customer's records.
pub struct PaymentHistoryService {
    store: Arc<dyn PaymentHistoryStore>,
    write_lock: Mutex<()>,
}

impl PaymentHistoryService {
    pub fn new(store: Arc<dyn PaymentHistoryStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load_log(&self) -> PaymentLog {
        match self.store.load().await {
            Ok(records) => PaymentLog::new(records),
            Err(e) => {
                tracing::error!(error = %e, "Failed to retrieve payment history");
                PaymentLog::default()
            }
        }
    }

    async fn load_for_write(&self) -> Result<PaymentLog, HistoryError> {
        let records = self.store.load().await.map_err(|e| {
            tracing::error!(error = %e, "Payment history unreadable, write skipped");
            e
        })?;
        Ok(PaymentLog::new(records))
    }

    /// Adds a record at the front of the log, assigning id and timestamp.
    pub async fn add_record(&self, new: NewPaymentRecord) -> Result<PaymentRecord, HistoryError> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.load_for_write().await?;
        let record = new.into_record(Timestamp::now());
        log.push(record.clone());
        self.store.save(log.records()).await?;

        tracing::info!(
            order_id = %record.order_id,
            amount = record.amount,
            status = %record.status,
            "Payment record added"
        );
        Ok(record)
    }

    /// The customer's records, newest first.
    pub async fn history(&self, customer_email: &str) -> Vec<PaymentRecord> {
        self.load_log()
            .await
            .for_customer(customer_email)
            .into_records()
    }

    pub async fn by_order_id(&self, order_id: &str) -> Option<PaymentRecord> {
        self.load_log().await.find_by_order_id(order_id).cloned()
    }

    pub async fn by_reference(&self, reference: &str) -> Option<PaymentRecord> {
        self.load_log().await.find_by_reference(reference).cloned()
    }

    /// Updates a record's status. `Ok(None)` when no record has that id.
    pub async fn update_status(
        &self,
        id: &PaymentRecordId,
        status: PaymentRecordStatus,
    ) -> Result<Option<PaymentRecord>, HistoryError> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.load_for_write().await?;
        let Some(updated) = log.update_status(id, status).cloned() else {
            return Ok(None);
        };
        self.store.save(log.records()).await?;

        tracing::info!(payment_id = %id, status = %status, "Payment status updated");
        Ok(Some(updated))
    }

    pub async fn statistics(&self, customer_email: &str) -> PaymentStatistics {
        self.load_log()
            .await
            .for_customer(customer_email)
            .statistics()
    }

    /// Removes the customer's records; other customers are untouched.
    pub async fn clear(&self, customer_email: &str) -> Result<usize, HistoryError> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.load_for_write().await?;
        let removed = log.remove_customer(customer_email);
        if removed > 0 {
            self.store.save(log.records()).await?;
        }
        tracing::info!(removed, "Payment history cleared for customer");
        Ok(removed)
    }

    pub async fn export_csv(&self, customer_email: &str) -> String {
        let csv = self.load_log().await.for_customer(customer_email).to_csv();
        tracing::info!("Payment history exported as CSV");
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryHistoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ADA: &str = "ada@example.com";

    fn new_record(order_id: &str, reference: &str, amount: f64) -> NewPaymentRecord {
        new_record_for(ADA, order_id, reference, amount)
    }

    fn new_record_for(email: &str, order_id: &str, reference: &str, amount: f64) -> NewPaymentRecord {
        NewPaymentRecord {
            order_id: order_id.to_string(),
            amount,
            currency: "NGN".to_string(),
            status: PaymentRecordStatus::Pending,
            reference: reference.to_string(),
            customer_email: email.to_string(),
            customer_name: None,
            payment_method: "paystack".to_string(),
            metadata: None,
        }
    }

    fn service() -> PaymentHistoryService {
        PaymentHistoryService::new(Arc::new(InMemoryHistoryStore::new()))
    }

    /// Store whose reads fail; counts the writes that still reach it.
    #[derive(Default)]
    struct UnreadableStore {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl PaymentHistoryStore for UnreadableStore {
        async fn load(&self) -> Result<Vec<PaymentRecord>, HistoryError> {
            Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt").into())
        }
        async fn save(&self, _records: &[PaymentRecord]) -> Result<(), HistoryError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn clear(&self) -> Result<(), HistoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn add_record_assigns_id_and_persists() {
        let svc = service();
        let record = svc.add_record(new_record("o1", "ref_1", 100.0)).await.unwrap();

        assert!(record.id.as_str().starts_with("payment_"));
        let history = svc.history(ADA).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);
    }

    #[tokio::test]
    async fn newest_record_comes_first() {
        let svc = service();
        svc.add_record(new_record("o1", "ref_1", 1.0)).await.unwrap();
        svc.add_record(new_record("o2", "ref_2", 1.0)).await.unwrap();

        let history = svc.history(ADA).await;
        assert_eq!(history[0].order_id, "o2");
        assert_eq!(history[1].order_id, "o1");
    }

    #[tokio::test]
    async fn lookups_by_order_and_reference() {
        let svc = service();
        svc.add_record(new_record("o1", "ref_1", 1.0)).await.unwrap();

        assert_eq!(svc.by_order_id("o1").await.unwrap().reference, "ref_1");
        assert_eq!(svc.by_reference("ref_1").await.unwrap().order_id, "o1");
        assert!(svc.by_reference("nope").await.is_none());
    }

    #[tokio::test]
    async fn update_status_persists() {
        let svc = service();
        let record = svc.add_record(new_record("o1", "ref_1", 500.0)).await.unwrap();

        let updated = svc
            .update_status(&record.id, PaymentRecordStatus::Success)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, PaymentRecordStatus::Success);

        let stats = svc.statistics(ADA).await;
        assert_eq!(stats.successful_transactions, 1);
        assert_eq!(stats.total_amount, 500.0);
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let svc = service();
        let result = svc
            .update_status(
                &PaymentRecordId::from_string("payment_0_missing"),
                PaymentRecordStatus::Failed,
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn clear_empties_history() {
        let svc = service();
        svc.add_record(new_record("o1", "ref_1", 1.0)).await.unwrap();
        assert_eq!(svc.clear(ADA).await.unwrap(), 1);
        assert!(svc.history(ADA).await.is_empty());
        assert_eq!(
            svc.export_csv(ADA).await,
            "ID,Order ID,Amount,Currency,Status,Reference,Email,Date"
        );
    }

    #[tokio::test]
    async fn unreadable_store_reads_as_empty() {
        let svc = PaymentHistoryService::new(Arc::new(UnreadableStore::default()));
        assert!(svc.history(ADA).await.is_empty());
        assert_eq!(svc.statistics(ADA).await, PaymentStatistics::default());
        assert!(svc.by_reference("ref_1").await.is_none());
    }

    #[tokio::test]
    async fn unreadable_store_is_never_overwritten() {
        let store = Arc::new(UnreadableStore::default());
        let svc = PaymentHistoryService::new(store.clone());

        assert!(svc.add_record(new_record("o1", "r", 1.0)).await.is_err());
        assert!(svc
            .update_status(
                &PaymentRecordId::from_string("payment_0_any"),
                PaymentRecordStatus::Success
            )
            .await
            .is_err());
        assert!(svc.clear(ADA).await.is_err());

        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn customers_only_see_their_own_records() {
        let svc = service();
        svc.add_record(new_record("o1", "ref_1", 100.0)).await.unwrap();
        svc.add_record(new_record_for("bola@example.com", "o2", "ref_2", 900.0))
            .await
            .unwrap();

        let mine = svc.history(ADA).await;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].reference, "ref_1");
        assert!(!svc.export_csv(ADA).await.contains("bola@example.com"));

        assert_eq!(svc.clear(ADA).await.unwrap(), 1);
        assert_eq!(svc.history("bola@example.com").await.len(), 1);
        assert!(svc.by_reference("ref_2").await.is_some());
    }

    #[tokio::test]
    async fn concurrent_adds_keep_every_record() {
        let svc = Arc::new(service());
        let mut handles = Vec::new();
        for i in 0..20 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.add_record(new_record(&format!("o{}", i), "r", 1.0))
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(svc.history(ADA).await.len(), 20);
    }
}
