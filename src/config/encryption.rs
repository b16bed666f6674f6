//! Order id encryption configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::crypto::OrderIdCipher;
use crate::domain::foundation::EncryptionError;

/// AES key and IV, both hex encoded
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncryptionConfig {
    #[serde(default)]
    pub key: Option<SecretString>,

    #[serde(default)]
    pub iv: Option<String>,
}

impl EncryptionConfig {
    /// Builds the order id cipher. Absent credentials are `MissingCredentials`.
    pub fn cipher(&self) -> Result<OrderIdCipher, EncryptionError> {
        match (&self.key, &self.iv) {
            (Some(key), Some(iv)) => OrderIdCipher::new(key.expose_secret(), iv),
            _ => Err(EncryptionError::MissingCredentials),
        }
    }

    /// Validate encryption configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.is_none() {
            return Err(ValidationError::MissingRequired("ENCRYPTION_KEY"));
        }
        if self.iv.is_none() {
            return Err(ValidationError::MissingRequired("ENCRYPTION_IV"));
        }
        self.cipher()
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidEncryptionKey(e.to_string()))
    }
}
