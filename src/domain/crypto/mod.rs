//! Order id encryption and payload signing.

mod order_cipher;
mod payload_signer;

pub use order_cipher::{is_valid_encrypted, OrderIdCipher};
pub use payload_signer::PayloadSigner;
