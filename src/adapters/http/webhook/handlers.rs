//! HTTP handlers for webhook endpoints.
//!
//! The body is read as raw bytes; signatures are computed over exactly what
//! the provider sent.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Json, Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::extract_client_ip;
use crate::application::handlers::{ProcessWebhookCommand, ProcessWebhookHandler};
use crate::domain::webhook::WebhookError;

use super::dto::{WebhookAck, WebhookErrorResponse, WebhookHealthResponse};

/// Header carrying the HMAC-SHA512 of the body.
pub const PAYSTACK_SIGNATURE_HEADER: &str = "x-paystack-signature";

const PAYSTACK: &str = "paystack";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WebhookAppState {
    pub paystack: Arc<ProcessWebhookHandler>,
}

impl WebhookAppState {
    pub fn new(paystack: Arc<ProcessWebhookHandler>) -> Self {
        Self { paystack }
    }

    fn handler_for(&self, provider: &str) -> Result<&ProcessWebhookHandler, WebhookApiError> {
        match provider {
            PAYSTACK => Ok(&self.paystack),
            other => Err(WebhookApiError::UnknownProvider(other.to_string())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhooks/:provider - Verify and dispatch a webhook delivery
pub async fn handle_webhook(
    State(state): State<WebhookAppState>,
    Path(provider): Path<String>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookApiError> {
    let handler = state.handler_for(&provider)?;

    let cmd = ProcessWebhookCommand {
        payload: body.to_vec(),
        signature: signature_header(&headers),
        client_ip: extract_client_ip(&headers, connect_info.as_ref()),
    };

    let result = handler.handle(cmd).await?;
    tracing::debug!(provider = %provider, result = ?result, "Webhook handled");

    Ok(Json(WebhookAck::processed()))
}

/// Signature header as sent. A header that is present but not visible ASCII
/// is kept lossily so it fails verification instead of reading as absent.
fn signature_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(PAYSTACK_SIGNATURE_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// GET /webhooks/:provider - Endpoint liveness
pub async fn webhook_health(
    State(state): State<WebhookAppState>,
    Path(provider): Path<String>,
) -> Result<Json<WebhookHealthResponse>, WebhookApiError> {
    state.handler_for(&provider)?;
    Ok(Json(WebhookHealthResponse::active(&provider)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub enum WebhookApiError {
    Webhook(WebhookError),
    UnknownProvider(String),
}

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self::Webhook(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        match self {
            WebhookApiError::UnknownProvider(provider) => {
                tracing::debug!(provider = %provider, "Webhook for unknown provider");
                (
                    StatusCode::NOT_FOUND,
                    Json(WebhookErrorResponse::new("Unknown webhook provider")),
                )
                    .into_response()
            }
            WebhookApiError::Webhook(err) => {
                if err.status_code().is_server_error() {
                    tracing::error!(error = %err, retryable = err.is_retryable(), "Webhook processing error");
                }
                let mut response = (
                    err.status_code(),
                    Json(WebhookErrorResponse::new(err.public_message())),
                )
                    .into_response();
                if let WebhookError::RateLimited { retry_after_secs } = err {
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                }
                response
            }
        }
    }
}
