//! Local payment history.

mod log;
mod record;

pub use log::{PaymentLog, PaymentStatistics, MAX_RECORDS_PER_CUSTOMER};
pub use record::{NewPaymentRecord, PaymentRecord, PaymentRecordStatus};
