//! REST clients for the order API and the payment service.
//!
//! Both clients speak JSON, apply a per-request timeout and normalize every
//! failure into [`ApiError`](crate::ports::ApiError).

mod error;
mod order_client;
mod payment_client;

pub use order_client::{OrderApiClient, ORDER_API_TIMEOUT};
pub use payment_client::{PaymentServiceClient, PAYMENT_API_TIMEOUT};
