//! Payment status polling: states and timing.

mod backoff;
mod state;

pub use backoff::{
    retry_delay, BackoffPolicy, PollingConfig, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
};
pub use state::PollState;
