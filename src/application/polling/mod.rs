//! Payment status polling.
//!
//! - [`PaymentStatusPoller`] - interval poller with a timeout, one task per session
//! - [`ManualPaymentPoller`] - caller-driven poller with stepped backoff

mod manual_poller;
mod payment_status_poller;

pub use manual_poller::{ManualPaymentPoller, ManualPollError};
pub use payment_status_poller::{PaymentStatusPoller, PollHandle, PollObserver, PollSnapshot};
