//! Paystack webhook signature verification.
//!
//! Paystack signs the raw request body with HMAC-SHA512 keyed by the
//! account's secret and sends the lowercase hex digest in
//! `x-paystack-signature`. There is no timestamp in the scheme.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::payload::WebhookPayload;

type HmacSha512 = Hmac<Sha512>;

/// Verifier for Paystack webhook signatures.
///
/// Built without a secret it fails closed: every verification returns
/// [`WebhookError::SecretNotConfigured`].
#[derive(Clone)]
pub struct PaystackWebhookVerifier {
    secret: Option<SecretString>,
}

impl PaystackWebhookVerifier {
    pub fn new(secret: Option<SecretString>) -> Self {
        let secret = secret.filter(|s| !s.expose_secret().is_empty());
        if secret.is_none() {
            tracing::error!("Paystack webhook secret not configured; all webhooks will be rejected");
        }
        Self { secret }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Verifies `signature` against the raw body.
    ///
    /// The header is hex-decoded before comparison, so digit case does not
    /// matter. Non-hex input fails verification.
    pub fn verify(&self, payload: &[u8], signature: &str) -> Result<(), WebhookError> {
        let secret = self.secret.as_ref().ok_or_else(|| {
            tracing::error!("Paystack webhook secret not configured");
            WebhookError::SecretNotConfigured
        })?;

        let provided =
            hex::decode(signature.trim()).map_err(|_| WebhookError::InvalidSignature)?;
        let expected = compute_signature(secret.expose_secret().as_bytes(), payload);

        if !constant_time_compare(&expected, &provided) {
            return Err(WebhookError::InvalidSignature);
        }
        Ok(())
    }

    /// Verifies the signature, then parses the event envelope.
    ///
    /// Only bodies that are not a JSON object with an `event` string are
    /// malformed here; `data` is left for the caller to interpret.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookPayload, WebhookError> {
        self.verify(payload, signature)?;

        serde_json::from_slice(payload).map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }
}

impl std::fmt::Debug for PaystackWebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackWebhookVerifier")
            .field("configured", &self.is_configured())
            .finish()
    }
}

fn compute_signature(secret: &[u8], payload: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length.
    let mut mac = match HmacSha512::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(),
    };
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Hex HMAC-SHA512 of `payload`, as Paystack would send it.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    hex::encode(compute_signature(secret.as_bytes(), payload))
}
