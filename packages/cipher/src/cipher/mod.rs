//! AEAD encryption stages and their wire format

mod aead_stage;
mod algorithm;
pub mod envelope;
pub mod nonce;

pub use self::aead_stage::{AeadCipher, AeadStage, Aes256Gcm, AesGcmStage, ChaChaStage};
pub use self::algorithm::{CipherAlgorithm, UnknownCipher};

use crate::key::SecretKey;
use duplex_common::{Result, SharedStage};
use std::sync::Arc;

/// Build a shareable cipher stage for `algorithm`
///
/// # Errors
///
/// Returns [`duplex_common::TransformError::InvalidKey`] if the key is rejected.
pub fn cipher_stage(
    algorithm: CipherAlgorithm,
    key: &SecretKey,
    aad: Option<&[u8]>,
) -> Result<SharedStage> {
    let aad = aad.unwrap_or_default().to_vec();
    Ok(match algorithm {
        CipherAlgorithm::Aes256Gcm => Arc::new(AesGcmStage::new(key)?.with_aad(aad)),
        CipherAlgorithm::ChaCha20Poly1305 => Arc::new(ChaChaStage::new(key)?.with_aad(aad)),
    })
}
