//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the checkout domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{messages, CheckoutError, EncryptionError, QueryError, ValidationError};
pub use ids::{OrderId, PaymentRecordId};
pub use timestamp::Timestamp;
