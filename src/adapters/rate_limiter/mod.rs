//! Rate limiter adapters.
//!
//! ## Usage
//!
//! ```ignore
//! use ordaro_checkout::adapters::rate_limiter::{
//!     spawn_sweeper, InMemoryRateLimiter, RateLimitConfig,
//! };
//!
//! let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig::enabled()));
//! let sweeper = spawn_sweeper(limiter.clone(), Duration::from_secs(60), shutdown_rx);
//! ```

mod config;
mod in_memory;
mod sweeper;

pub use config::RateLimitConfig;
pub use in_memory::InMemoryRateLimiter;
pub use sweeper::spawn_sweeper;
