//! AES-CBC cipher for order ids embedded in QR codes.
//!
//! QR codes carry `hex(AES-CBC(key, iv, order_id))` with PKCS#7 padding and
//! no IV prefix. Key and IV are fixed per deployment and supplied as hex.
//! A fixed IV leaks equality of plaintexts; it stays because every QR code
//! already printed depends on it.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use secrecy::{ExposeSecret, SecretVec};

use crate::domain::foundation::EncryptionError;

const BLOCK_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Aes128),
            24 => Some(KeySize::Aes192),
            32 => Some(KeySize::Aes256),
            _ => None,
        }
    }
}

/// Encrypts and decrypts order ids with the deployment's fixed key and IV.
pub struct OrderIdCipher {
    key: SecretVec<u8>,
    iv: [u8; BLOCK_SIZE],
    size: KeySize,
}

impl OrderIdCipher {
    /// Builds a cipher from hex-encoded key and IV.
    ///
    /// # Errors
    ///
    /// - `MissingCredentials` if either value is empty
    /// - `InvalidKey` if either is not hex, the key is not 16/24/32 bytes, or
    ///   the IV is not 16 bytes
    pub fn new(key_hex: &str, iv_hex: &str) -> Result<Self, EncryptionError> {
        let key_hex = key_hex.trim();
        let iv_hex = iv_hex.trim();
        if key_hex.is_empty() || iv_hex.is_empty() {
            return Err(EncryptionError::MissingCredentials);
        }

        let key = hex::decode(key_hex)
            .map_err(|e| EncryptionError::InvalidKey(format!("key is not hex: {}", e)))?;
        let size = KeySize::from_len(key.len()).ok_or_else(|| {
            EncryptionError::InvalidKey(format!(
                "key must be 16, 24 or 32 bytes, got {}",
                key.len()
            ))
        })?;

        let iv_bytes = hex::decode(iv_hex)
            .map_err(|e| EncryptionError::InvalidKey(format!("iv is not hex: {}", e)))?;
        let iv: [u8; BLOCK_SIZE] = iv_bytes.as_slice().try_into().map_err(|_| {
            EncryptionError::InvalidKey(format!("iv must be 16 bytes, got {}", iv_bytes.len()))
        })?;

        Ok(Self {
            key: SecretVec::new(key),
            iv,
            size,
        })
    }

    /// Encrypts `plaintext`, returning lowercase hex ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, EncryptionError> {
        if plaintext.is_empty() {
            return Err(EncryptionError::EmptyPlaintext);
        }
        let key = self.key.expose_secret();
        let data = plaintext.as_bytes();

        let ciphertext = match self.size {
            KeySize::Aes128 => encrypt_with::<cbc::Encryptor<aes::Aes128>>(key, &self.iv, data),
            KeySize::Aes192 => encrypt_with::<cbc::Encryptor<aes::Aes192>>(key, &self.iv, data),
            KeySize::Aes256 => encrypt_with::<cbc::Encryptor<aes::Aes256>>(key, &self.iv, data),
        }?;
        Ok(hex::encode(ciphertext))
    }

    /// Decrypts hex ciphertext back to the order id.
    ///
    /// Fails on invalid hex, a length that is not whole blocks, bad padding,
    /// non-UTF-8 output, or an empty result.
    pub fn decrypt(&self, encrypted: &str) -> Result<String, EncryptionError> {
        let encrypted = encrypted.trim();
        if encrypted.is_empty() {
            return Err(EncryptionError::InvalidCiphertext("empty input".to_string()));
        }
        let ciphertext = hex::decode(encrypted)
            .map_err(|e| EncryptionError::InvalidCiphertext(e.to_string()))?;
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(EncryptionError::InvalidCiphertext(format!(
                "length {} is not a multiple of {}",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        let key = self.key.expose_secret();
        let plaintext = match self.size {
            KeySize::Aes128 => {
                decrypt_with::<cbc::Decryptor<aes::Aes128>>(key, &self.iv, &ciphertext)
            }
            KeySize::Aes192 => {
                decrypt_with::<cbc::Decryptor<aes::Aes192>>(key, &self.iv, &ciphertext)
            }
            KeySize::Aes256 => {
                decrypt_with::<cbc::Decryptor<aes::Aes256>>(key, &self.iv, &ciphertext)
            }
        }?;

        let text = String::from_utf8(plaintext)
            .map_err(|_| EncryptionError::DecryptionFailed("plaintext is not UTF-8".to_string()))?;
        if text.is_empty() {
            return Err(EncryptionError::DecryptionFailed("empty result".to_string()));
        }
        Ok(text)
    }
}

impl std::fmt::Debug for OrderIdCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderIdCipher")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Cheap shape check for an encrypted order id before attempting decryption.
///
/// True for non-empty hex with an even number of digits that decodes to a
/// whole number of AES blocks.
pub fn is_valid_encrypted(encrypted: &str) -> bool {
    let s = encrypted.trim();
    !s.is_empty()
        && s.len() % 2 == 0
        && s.bytes().all(|b| b.is_ascii_hexdigit())
        && (s.len() / 2) % BLOCK_SIZE == 0
}

fn encrypt_with<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, EncryptionError>
where
    C: KeyIvInit + BlockEncryptMut,
{
    let cipher =
        C::new_from_slices(key, iv).map_err(|e| EncryptionError::InvalidKey(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
}

fn decrypt_with<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, EncryptionError>
where
    C: KeyIvInit + BlockDecryptMut,
{
    let cipher =
        C::new_from_slices(key, iv).map_err(|e| EncryptionError::InvalidKey(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| EncryptionError::DecryptionFailed("bad padding".to_string()))
}
