//! Webhook error types for Paystack webhook handling.
//!
//! Every failure on the webhook path maps to exactly one HTTP status so the
//! endpoint never needs a catch-all.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// No signing secret is configured; every webhook is rejected.
    #[error("Webhook secret not configured")]
    SecretNotConfigured,

    /// The `x-paystack-signature` header was absent.
    #[error("Missing signature")]
    MissingSignature,

    /// Signature did not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Client exceeded the webhook rate limit.
    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    /// Body passed verification but is not a valid payload.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The success handler failed; the provider should redeliver.
    #[error("Handler failed: {0}")]
    HandlerFailed(String),
}

impl WebhookError {
    /// Returns true if Paystack should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::HandlerFailed(_) | WebhookError::RateLimited { .. }
        )
    }

    /// Maps the error to the HTTP status returned to the provider.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SecretNotConfigured
            | WebhookError::MissingSignature
            | WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,

            WebhookError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,

            // JSON errors historically fell into the catch-all.
            WebhookError::MalformedPayload(_) | WebhookError::HandlerFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `error` field of the response body.
    ///
    /// Internal details never leave the process; 500s collapse to a fixed text.
    pub fn public_message(&self) -> &'static str {
        match self {
            WebhookError::SecretNotConfigured | WebhookError::InvalidSignature => {
                "Invalid signature"
            }
            WebhookError::MissingSignature => "Missing signature",
            WebhookError::RateLimited { .. } => "Rate limit exceeded",
            WebhookError::MalformedPayload(_) | WebhookError::HandlerFailed(_) => {
                "Internal server error"
            }
        }
    }
}
