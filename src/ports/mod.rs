//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the checkout domain and the outside world. Adapters implement these ports.
//!
//! ## Upstream APIs
//!
//! - `OrderApi` - Order management system (orders, links, status)
//! - `PaymentApi` - Payment service fronting Paystack
//!
//! ## Infrastructure
//!
//! - `RateLimiter` - Fixed-window request limiting
//! - `PaymentEventSink` - Delivery of verified webhook outcomes
//! - `PaymentHistoryStore` - Persistence of the local payment log

mod api_error;
mod order_api;
mod payment_api;
mod payment_event_sink;
mod payment_history_store;
mod rate_limiter;

pub use api_error::ApiError;
pub use order_api::OrderApi;
pub use payment_api::PaymentApi;
pub use payment_event_sink::{PaymentEventError, PaymentEventSink};
pub use payment_history_store::{HistoryError, PaymentHistoryStore};
pub use rate_limiter::{
    RateLimitDecision, RateLimitError, RateLimitKey, RateLimitScope, RateLimiter,
};
