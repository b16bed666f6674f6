//! Orders and payment API shapes.

mod order;
mod payment;

#[cfg(test)]
pub(crate) use order::fixtures;
pub use order::{Customer, Order, OrderItem, OrderModifier, Organization, PaymentStatus};
pub use payment::{
    InitializePaymentRequest, InitializePaymentResponse, PaymentLinkResponse,
    PaymentStatusPollingResponse, PaymentStatusResponse, VerifyOrderRequest, VerifyOrderResponse,
};
