//! Axum router configuration for webhook endpoints.

use axum::{routing::post, Router};

use super::handlers::{handle_webhook, webhook_health, WebhookAppState};

/// Create the webhook router, meant to be nested at `/webhooks`.
///
/// # Routes
/// - `POST /:provider` - Handle a webhook delivery (signature verified)
/// - `GET /:provider` - Endpoint liveness
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/:provider", post(handle_webhook).get(webhook_health))
}
