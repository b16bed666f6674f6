//! HTTP adapters - REST API implementations.
//!
//! - `checkout` - Customer checkout API under `/api/checkout`
//! - `webhook` - Payment provider webhooks under `/webhooks`
//! - `health` - Liveness
//! - `middleware` - Rate limiting and security headers
//! - `router` - Assembles everything with tracing, CORS and timeouts

pub mod checkout;
pub mod health;
pub mod middleware;
pub mod router;
pub mod webhook;

// Re-export key types for convenience
pub use checkout::{checkout_routes, CheckoutAppState};
pub use router::{build_router, RouterSettings};
pub use webhook::{webhook_routes, WebhookAppState};
