//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod checkout;
pub mod webhook;

pub use checkout::{
    CheckoutOrderSummary, GetCheckoutOrderHandler, GetCheckoutOrderQuery, GetPaymentLinkHandler,
    GetPaymentLinkQuery, GetPaymentStatusHandler, GetPaymentStatusQuery, InitializePaymentCommand,
    InitializePaymentHandler, VerifyOrderHandler, VerifyOrderQuery,
};
pub use webhook::{ProcessWebhookCommand, ProcessWebhookHandler, ProcessWebhookResult};
