//! Upstream API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Base URLs and timeouts of the order API and payment service
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Order management API base URL
    pub ordaro_api_url: String,

    /// Payment service base URL
    pub payment_service_url: String,

    #[serde(default = "default_order_timeout")]
    pub order_timeout_secs: u64,

    #[serde(default = "default_payment_timeout")]
    pub payment_timeout_secs: u64,
}

impl ApiConfig {
    pub fn order_timeout(&self) -> Duration {
        Duration::from_secs(self.order_timeout_secs)
    }

    pub fn payment_timeout(&self) -> Duration {
        Duration::from_secs(self.payment_timeout_secs)
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_url(&self.ordaro_api_url, "ORDARO_API_URL")?;
        check_url(&self.payment_service_url, "PAYMENT_SERVICE_URL")?;
        if self.order_timeout_secs == 0 || self.order_timeout_secs > 120 {
            return Err(ValidationError::InvalidUpstreamTimeout("order API"));
        }
        if self.payment_timeout_secs == 0 || self.payment_timeout_secs > 120 {
            return Err(ValidationError::InvalidUpstreamTimeout("payment service"));
        }
        Ok(())
    }
}

fn check_url(url: &str, name: &'static str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    Ok(())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            ordaro_api_url: String::new(),
            payment_service_url: String::new(),
            order_timeout_secs: default_order_timeout(),
            payment_timeout_secs: default_payment_timeout(),
        }
    }
}

fn default_order_timeout() -> u64 {
    10
}

fn default_payment_timeout() -> u64 {
    15
}
