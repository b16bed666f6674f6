//! Paystack webhooks: payload, classification, verification, errors.

mod errors;
mod event;
mod payload;
mod verifier;

pub use errors::WebhookError;
pub use event::WebhookEventKind;
#[cfg(test)]
pub(crate) use payload::fixtures;
pub use payload::{CardAuthorization, WebhookCustomer, WebhookData, WebhookPayload};
pub use verifier::{sign_payload, PaystackWebhookVerifier};
