//! Normalized error of the upstream REST collaborators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::CheckoutError;

/// Error returned by the order API and payment service ports.
///
/// `status` is `None` when no response arrived at all.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Transport-level failure; the request may never have reached the server.
    pub fn no_response(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
            details: None,
        }
    }

    /// Non-success HTTP response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: Some(status),
            details: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether repeating the request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self.status {
            None => true,
            Some(s) => s >= 500 || s == 408 || s == 429,
        }
    }
}

impl From<ApiError> for CheckoutError {
    fn from(err: ApiError) -> Self {
        match err.status {
            None => CheckoutError::Network {
                message: err.message,
                status: None,
                retryable: true,
            },
            Some(_) => CheckoutError::Payment {
                message: err.message,
                code: err.code,
                status: err.status,
                details: err.details,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_response_is_retryable_network_error() {
        let err = ApiError::no_response("No response from server");
        assert!(err.is_retryable());
        let checkout: CheckoutError = err.into();
        assert!(matches!(checkout, CheckoutError::Network { .. }));
        assert!(checkout.is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!ApiError::from_status(404, "Not found").is_retryable());
        assert!(!ApiError::from_status(422, "Bad").is_retryable());
        assert!(ApiError::from_status(502, "Bad gateway").is_retryable());
        assert!(ApiError::from_status(429, "Slow down").is_retryable());
    }

    #[test]
    fn response_errors_become_payment_errors() {
        let err = ApiError::from_status(404, "Order not found").with_code("ORDER_NOT_FOUND");
        let checkout: CheckoutError = err.into();
        let q = checkout.to_query_error();
        assert_eq!(q.message, "Order not found");
        assert_eq!(q.code.as_deref(), Some("ORDER_NOT_FOUND"));
        assert_eq!(q.status, Some(404));
    }
}
