//! Payment event sink adapters.
//!
//! - `LoggingPaymentEventSink` - default; records outcomes in the log
//! - `InMemoryPaymentEventSink` - captures calls for tests

mod in_memory;
mod logging_sink;

pub use in_memory::{InMemoryPaymentEventSink, RecordedOutcome};
pub use logging_sink::LoggingPaymentEventSink;
