//! Error types for the domain layer.
//!
//! The checkout flow distinguishes four failure families:
//!
//! - [`ValidationError`] - bad input shape (form fields, ids)
//! - [`EncryptionError`] - order id could not be encrypted or decrypted
//! - [`CheckoutError::Network`] - transport failure, carries a retryable flag
//! - [`CheckoutError::Payment`] - upstream rejection with optional code/status/details
//!
//! Everything that reaches an HTTP client is first flattened into a
//! [`QueryError`], which never carries stack traces or raw upstream bodies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed user-facing messages.
pub mod messages {
    pub const DECRYPTION_FAILED: &str =
        "Failed to decrypt order information. Please check your QR code and try again.";
    pub const INVALID_ORDER_ID: &str = "Invalid order ID format.";
    pub const MISSING_ENCRYPTION_KEY: &str = "Encryption configuration is missing.";

    pub const ORDER_NOT_FOUND: &str =
        "Order could not be found. Please check your QR code and try again.";
    pub const ORDER_ALREADY_PAID: &str = "This order has already been paid.";
    pub const INVALID_ORDER: &str = "Invalid order information.";

    pub const PAYMENT_INITIALIZATION_FAILED: &str =
        "Failed to initialize payment. Please try again.";
    pub const PAYMENT_VERIFICATION_FAILED: &str = "Failed to verify payment. Please try again.";
    pub const PAYMENT_TIMEOUT: &str =
        "Payment processing took too long. Please check your order status.";
    pub const PAYMENT_FAILED: &str = "Payment failed. Please try again or contact support.";

    pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
    pub const API_ERROR: &str = "API error. Please try again later.";
    pub const TIMEOUT: &str = "Request timed out. Please try again.";

    pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
    pub const INVALID_PHONE: &str = "Please enter a valid phone number.";
    pub const REQUIRED_FIELD: &str = "This field is required.";

    pub const UNKNOWN_ERROR: &str = "An unexpected error occurred. Please try again.";
    pub const CONTACT_SUPPORT: &str = "If the problem persists, please contact support.";
}

/// Errors that occur during value object construction and input checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The offending field name.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

/// Failures of the order id cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    #[error("Missing encryption credentials")]
    MissingCredentials,

    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Nothing to encrypt")]
    EmptyPlaintext,
}

/// Top-level error taxonomy of the checkout flow.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error("{message}")]
    Network {
        message: String,
        status: Option<u16>,
        retryable: bool,
    },

    #[error("{message}")]
    Payment {
        message: String,
        code: Option<String>,
        status: Option<u16>,
        details: Option<serde_json::Value>,
    },
}

impl CheckoutError {
    /// Creates a retryable network error.
    pub fn network(message: impl Into<String>) -> Self {
        CheckoutError::Network {
            message: message.into(),
            status: None,
            retryable: true,
        }
    }

    /// Creates a payment error with only a message.
    pub fn payment(message: impl Into<String>) -> Self {
        CheckoutError::Payment {
            message: message.into(),
            code: None,
            status: None,
            details: None,
        }
    }

    /// HTTP status associated with the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CheckoutError::Network { status, .. } | CheckoutError::Payment { status, .. } => {
                *status
            }
            CheckoutError::Validation(_) => Some(400),
            CheckoutError::Encryption(_) => None,
        }
    }

    /// Whether repeating the same request could succeed.
    ///
    /// Upstream errors without a status are treated as transient; with a
    /// status, only 5xx, 408 and 429 are.
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Network { retryable, .. } => *retryable,
            CheckoutError::Payment { status, .. } => match status {
                None => true,
                Some(s) => *s >= 500 || *s == 408 || *s == 429,
            },
            CheckoutError::Validation(_) | CheckoutError::Encryption(_) => false,
        }
    }

    /// Message safe to show to an end user.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Validation(e) => e.to_string(),
            CheckoutError::Encryption(_) => messages::DECRYPTION_FAILED.to_string(),
            CheckoutError::Network { message, .. } => message.clone(),
            CheckoutError::Payment {
                message, status, ..
            } => {
                if !message.is_empty() {
                    return message.clone();
                }
                match status {
                    Some(404) => messages::ORDER_NOT_FOUND.to_string(),
                    Some(400) => messages::INVALID_ORDER.to_string(),
                    Some(s) if *s >= 500 => messages::API_ERROR.to_string(),
                    _ => messages::UNKNOWN_ERROR.to_string(),
                }
            }
        }
    }

    /// Machine-readable code for clients.
    pub fn code(&self) -> Option<String> {
        match self {
            CheckoutError::Validation(_) => Some("VALIDATION_FAILED".to_string()),
            CheckoutError::Encryption(_) => Some("DECRYPTION_FAILED".to_string()),
            CheckoutError::Network { .. } => Some("NETWORK_ERROR".to_string()),
            CheckoutError::Payment { code, .. } => code.clone(),
        }
    }

    /// Flattens the error into the uniform client-facing shape.
    pub fn to_query_error(&self) -> QueryError {
        QueryError {
            message: self.user_message(),
            code: self.code(),
            status: self.status(),
        }
    }
}

/// Uniform `{message, code?, status?}` error shape exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}
