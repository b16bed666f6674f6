//! HTTP adapter for payment provider webhooks.
//!
//! - `POST /webhooks/:provider` - Verify and dispatch a webhook delivery
//! - `GET /webhooks/:provider` - Liveness probe for the provider dashboard
//!
//! Only `paystack` is a known provider; others answer 404.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{WebhookAck, WebhookErrorResponse, WebhookHealthResponse};
pub use handlers::{handle_webhook, webhook_health, WebhookApiError, WebhookAppState};
pub use routes::webhook_routes;
