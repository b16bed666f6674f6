//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::{
    CheckoutOrderSummary, GetCheckoutOrderHandler, GetCheckoutOrderQuery, GetPaymentLinkHandler,
    GetPaymentLinkQuery, GetPaymentStatusHandler, GetPaymentStatusQuery, InitializePaymentCommand,
    InitializePaymentHandler, VerifyOrderHandler, VerifyOrderQuery,
};
use crate::application::PaymentHistoryService;
use crate::config::FeatureFlags;
use crate::domain::crypto::OrderIdCipher;
use crate::domain::foundation::{CheckoutError, EncryptionError};
use crate::domain::order::{
    InitializePaymentResponse, PaymentLinkResponse, PaymentStatusPollingResponse,
    PaymentStatusResponse, VerifyOrderResponse,
};
use crate::ports::{OrderApi, PaymentApi};

use super::dto::{ErrorResponse, InitializePaymentBody};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state of the checkout API.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub orders: Arc<dyn OrderApi>,
    pub payments: Arc<dyn PaymentApi>,
    pub cipher: Option<Arc<OrderIdCipher>>,
    pub history: Arc<PaymentHistoryService>,
    pub features: FeatureFlags,
}

impl CheckoutAppState {
    pub fn get_checkout_order_handler(&self) -> GetCheckoutOrderHandler {
        GetCheckoutOrderHandler::new(self.orders.clone(), self.cipher.clone())
    }

    pub fn initialize_payment_handler(&self) -> InitializePaymentHandler {
        InitializePaymentHandler::new(self.payments.clone()).with_history(self.history.clone())
    }

    pub fn payment_status_handler(&self) -> GetPaymentStatusHandler {
        GetPaymentStatusHandler::new(self.payments.clone(), self.orders.clone())
    }

    pub fn payment_link_handler(&self) -> GetPaymentLinkHandler {
        GetPaymentLinkHandler::new(self.orders.clone())
    }

    pub fn verify_order_handler(&self) -> VerifyOrderHandler {
        VerifyOrderHandler::new(self.orders.clone())
    }

    /// Wraps an application error, logging it where the flags ask for it.
    fn api_error(&self, err: CheckoutError) -> CheckoutApiError {
        let api_error = CheckoutApiError::new(err, self.features.verbose_errors);
        if self.features.enable_error_tracking && api_error.status().is_server_error() {
            tracing::error!(
                target: "error_tracking",
                code = %api_error.code(),
                error = %api_error.error,
                "Checkout request failed"
            );
        }
        api_error
    }

    fn track(&self, event: &'static str, order_id: &str) {
        if self.features.enable_analytics {
            tracing::info!(target: "analytics", event, order_id = %order_id, "Checkout event");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Order Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/checkout/orders/:id - Resolve an encrypted QR code id
pub async fn get_checkout_order(
    State(state): State<CheckoutAppState>,
    Path(encrypted_id): Path<String>,
) -> Result<Json<CheckoutOrderSummary>, CheckoutApiError> {
    let summary = state
        .get_checkout_order_handler()
        .handle(GetCheckoutOrderQuery { encrypted_id })
        .await
        .map_err(|e| state.api_error(e))?;

    state.track("order_viewed", &summary.order.id);
    Ok(Json(summary))
}

/// POST /api/checkout/orders/:id/verify - Check the order can be paid
pub async fn verify_order(
    State(state): State<CheckoutAppState>,
    Path(order_id): Path<String>,
) -> Result<Json<VerifyOrderResponse>, CheckoutApiError> {
    let response = state
        .verify_order_handler()
        .handle(VerifyOrderQuery { order_id })
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(response))
}

/// GET /api/checkout/orders/:id/payment-link - Shareable payment link
pub async fn get_payment_link(
    State(state): State<CheckoutAppState>,
    Path(order_id): Path<String>,
) -> Result<Json<PaymentLinkResponse>, CheckoutApiError> {
    let link = state
        .payment_link_handler()
        .handle(GetPaymentLinkQuery { order_id })
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(link))
}

// ════════════════════════════════════════════════════════════════════════════════
// Payment Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/checkout/orders/:id/payments - Start a hosted payment
pub async fn initialize_payment(
    State(state): State<CheckoutAppState>,
    Path(order_id): Path<String>,
    Json(body): Json<InitializePaymentBody>,
) -> Result<(StatusCode, Json<InitializePaymentResponse>), CheckoutApiError> {
    let cmd = InitializePaymentCommand {
        order_id: order_id.clone(),
        form: body.form(),
        currency: body.currency,
    };
    let response = state
        .initialize_payment_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.api_error(e))?;

    state.track("payment_initialized", &order_id);
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/checkout/orders/:id/payment-status - Status while the customer waits
pub async fn get_payment_status(
    State(state): State<CheckoutAppState>,
    Path(order_id): Path<String>,
) -> Result<Json<PaymentStatusPollingResponse>, CheckoutApiError> {
    let status = state
        .payment_status_handler()
        .handle(GetPaymentStatusQuery { order_id })
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(status))
}

/// GET /api/checkout/orders/:id/payment-details - Status recorded by the order system
pub async fn get_payment_details(
    State(state): State<CheckoutAppState>,
    Path(order_id): Path<String>,
) -> Result<Json<PaymentStatusResponse>, CheckoutApiError> {
    let status = state
        .payment_status_handler()
        .handle_detailed(GetPaymentStatusQuery { order_id })
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(status))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub struct CheckoutApiError {
    error: CheckoutError,
    verbose: bool,
}

impl CheckoutApiError {
    pub fn new(error: CheckoutError, verbose: bool) -> Self {
        Self { error, verbose }
    }

    /// HTTP status for the wrapped error.
    ///
    /// Upstream 4xx answers pass through, except 401 and 403: those mean
    /// this server's own credentials were refused, so they become 502 like
    /// upstream 5xx and transport failures.
    pub fn status(&self) -> StatusCode {
        match &self.error {
            CheckoutError::Validation(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Encryption(
                EncryptionError::MissingCredentials | EncryptionError::InvalidKey(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::Encryption(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Network { status, .. } => match status {
                Some(408) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
            CheckoutError::Payment { status, .. } => match status {
                Some(401 | 403) => StatusCode::BAD_GATEWAY,
                Some(s) if (400..500).contains(s) => {
                    StatusCode::from_u16(*s).unwrap_or(StatusCode::BAD_REQUEST)
                }
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn code(&self) -> String {
        self.error
            .code()
            .unwrap_or_else(|| "PAYMENT_ERROR".to_string())
    }
}

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self::new(err, false)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let query_error = self.error.to_query_error();
        let mut body = ErrorResponse::new(self.code(), query_error.message);
        if self.verbose {
            body = body.with_details(self.error.to_string());
        }
        (status, Json(body)).into_response()
    }
}
