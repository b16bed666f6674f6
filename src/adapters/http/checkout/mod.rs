//! HTTP adapter for the customer checkout flow.
//!
//! Exposes the checkout handlers via REST API under `/api/checkout`:
//! - `GET /orders/:id` - Resolve an encrypted QR code id
//! - `POST /orders/:id/verify` - Check the order can be paid
//! - `GET /orders/:id/payment-link` - Shareable payment link
//! - `POST /orders/:id/payments` - Start a hosted payment
//! - `GET /orders/:id/payment-status` - Status for polling
//! - `GET /orders/:id/payment-details` - Detailed status

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, InitializePaymentBody};
pub use handlers::{CheckoutApiError, CheckoutAppState};
pub use routes::checkout_routes;
