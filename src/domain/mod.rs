//! Domain layer containing checkout business rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, error taxonomy)
//! - `order` - Order snapshots and payment API shapes
//! - `webhook` - Paystack webhook payloads, classification and verification
//! - `crypto` - Order id cipher and payload signer
//! - `polling` - Poll session states and timing
//! - `history` - Bounded local payment log
//! - `validation` - Form and identifier validation

pub mod crypto;
pub mod foundation;
pub mod history;
pub mod order;
pub mod polling;
pub mod validation;
pub mod webhook;
