//! Ordaro Checkout - Customer-facing payment service for QR-code orders
//!
//! A customer scans a table QR code carrying an encrypted order id. This
//! crate resolves the order, starts a hosted Paystack payment, tracks its
//! status and accepts Paystack webhooks that confirm the outcome.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
