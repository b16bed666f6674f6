//! HTTP middleware for axum.
//!
//! - `rate_limit` - Per-client fixed-window limiting for the checkout API
//! - `security_headers` - Response headers applied to every route

pub mod rate_limit;
pub mod security_headers;

pub use rate_limit::{
    add_rate_limit_headers, extract_client_ip, rate_limit_middleware, rate_limit_response,
    RateLimiterState, UNKNOWN_CLIENT,
};
pub use security_headers::security_headers;
