//! Axum router configuration for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_checkout_order, get_payment_details, get_payment_link, get_payment_status,
    initialize_payment, verify_order, CheckoutAppState,
};

/// Create the checkout API router, meant to be nested at `/api/checkout`.
///
/// # Routes
///
/// ## Order Endpoints
/// - `GET /orders/:id` - Order summary for an encrypted QR code id
/// - `POST /orders/:id/verify` - Check the order can be paid
/// - `GET /orders/:id/payment-link` - Shareable payment link
///
/// ## Payment Endpoints
/// - `POST /orders/:id/payments` - Start a hosted payment
/// - `GET /orders/:id/payment-status` - Lightweight status for polling
/// - `GET /orders/:id/payment-details` - Status recorded by the order system
///
/// The local payment history is written by payment initialization and the
/// webhook only; it has no route of its own.
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        // Order endpoints
        .route("/orders/:id", get(get_checkout_order))
        .route("/orders/:id/verify", post(verify_order))
        .route("/orders/:id/payment-link", get(get_payment_link))
        // Payment endpoints
        .route("/orders/:id/payments", post(initialize_payment))
        .route("/orders/:id/payment-status", get(get_payment_status))
        .route("/orders/:id/payment-details", get(get_payment_details))
}
