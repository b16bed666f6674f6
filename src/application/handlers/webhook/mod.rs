//! Webhook handlers.
//!
//! Verification and dispatch of payment provider callbacks.

mod process_webhook;

pub use process_webhook::{ProcessWebhookCommand, ProcessWebhookHandler, ProcessWebhookResult};
