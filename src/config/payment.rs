//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (Paystack)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Paystack public key handed to the hosted checkout
    #[serde(default)]
    pub paystack_public_key: String,

    /// Secret used to verify webhook signatures.
    ///
    /// Optional at load time. Without it every webhook is rejected.
    #[serde(default)]
    pub paystack_webhook_secret: Option<SecretString>,
}

impl PaymentConfig {
    /// Check if using Paystack test mode
    pub fn is_test_mode(&self) -> bool {
        self.paystack_public_key.starts_with("pk_test_")
    }

    /// Check if using Paystack live mode
    pub fn is_live_mode(&self) -> bool {
        self.paystack_public_key.starts_with("pk_live_")
    }

    /// Webhook secret, treating an empty value as absent
    pub fn webhook_secret(&self) -> Option<SecretString> {
        self.paystack_webhook_secret
            .as_ref()
            .filter(|s| !s.expose_secret().trim().is_empty())
            .cloned()
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.paystack_public_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYSTACK_PUBLIC_KEY"));
        }

        // Verify key prefix for safety
        if !self.paystack_public_key.starts_with("pk_") {
            return Err(ValidationError::InvalidPaystackKey);
        }

        if self.webhook_secret().is_none() {
            if environment == Environment::Production {
                return Err(ValidationError::WebhookSecretRequired);
            }
            tracing::warn!("Paystack webhook secret not configured; webhooks will be rejected");
        }

        Ok(())
    }
}
