//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers start payments and process webhooks; query handlers
//! read orders and payment state through the upstream REST ports.

pub mod handlers;
pub mod history;
pub mod polling;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_support;

pub use handlers::{
    // Checkout
    CheckoutOrderSummary, GetCheckoutOrderHandler, GetCheckoutOrderQuery, GetPaymentLinkHandler,
    GetPaymentLinkQuery, GetPaymentStatusHandler, GetPaymentStatusQuery, InitializePaymentCommand,
    InitializePaymentHandler, VerifyOrderHandler, VerifyOrderQuery,
    // Webhooks
    ProcessWebhookCommand, ProcessWebhookHandler, ProcessWebhookResult,
};
pub use history::PaymentHistoryService;
pub use polling::{
    ManualPaymentPoller, ManualPollError, PaymentStatusPoller, PollHandle, PollObserver,
    PollSnapshot,
};
pub use retry::{with_retry, RetryPolicy};
