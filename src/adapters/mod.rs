//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Payment outcome sinks (logging, in-memory)
//! - `http` - Axum surface: checkout API, webhooks, health
//! - `rate_limiter` - In-memory fixed-window limiter and its sweeper
//! - `rest` - reqwest clients for the order API and payment service
//! - `storage` - Payment history stores (in-memory, JSON file)

pub mod events;
pub mod http;
pub mod rate_limiter;
pub mod rest;
pub mod storage;

pub use events::{InMemoryPaymentEventSink, LoggingPaymentEventSink};
pub use rate_limiter::{spawn_sweeper, InMemoryRateLimiter, RateLimitConfig};
pub use rest::{OrderApiClient, PaymentServiceClient};
pub use storage::{FileHistoryStore, InMemoryHistoryStore};
