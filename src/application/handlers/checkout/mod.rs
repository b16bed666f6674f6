//! Checkout handlers.
//!
//! ## Commands
//! - Initializing a hosted payment
//!
//! ## Queries
//! - Resolving a QR code to an order
//! - Payment status (summary and detailed)
//! - Payment link
//! - Order verification

mod get_checkout_order;
mod get_payment_link;
mod get_payment_status;
mod initialize_payment;
mod verify_order;

// Commands
pub use initialize_payment::{InitializePaymentCommand, InitializePaymentHandler};

// Queries
pub use get_checkout_order::{CheckoutOrderSummary, GetCheckoutOrderHandler, GetCheckoutOrderQuery};
pub use get_payment_link::{GetPaymentLinkHandler, GetPaymentLinkQuery};
pub use get_payment_status::{GetPaymentStatusHandler, GetPaymentStatusQuery};
pub use verify_order::{VerifyOrderHandler, VerifyOrderQuery};
