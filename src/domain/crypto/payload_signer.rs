//! HMAC-SHA256 signatures over JSON payloads.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signs serializable payloads with a shared secret.
///
/// The message is the compact JSON serialization of the payload, so field
/// order follows the type's declaration order.
pub struct PayloadSigner {
    secret: SecretString,
}

impl PayloadSigner {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Lowercase hex HMAC-SHA256 of the payload's JSON.
    pub fn sign<T: Serialize>(&self, payload: &T) -> Result<String, serde_json::Error> {
        let message = serde_json::to_vec(payload)?;
        Ok(hex::encode(self.mac(&message)))
    }

    /// Constant-time check of `signature` against the payload.
    ///
    /// Serialization failures and non-hex signatures verify as false.
    pub fn verify<T: Serialize>(&self, payload: &T, signature: &str) -> bool {
        let Ok(message) = serde_json::to_vec(payload) else {
            return false;
        };
        let Ok(provided) = hex::decode(signature) else {
            return false;
        };
        let expected = self.mac(&message);
        expected.len() == provided.len() && bool::from(expected.ct_eq(&provided))
    }

    fn mac(&self, message: &[u8]) -> Vec<u8> {
        match HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()) {
            Ok(mut mac) => {
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            Err(_) => Vec::new(),
        }
    }
}
