//! AEAD cipher stages

use super::CipherAlgorithm;
use super::envelope::Envelope;
use super::nonce::random_nonce;
use crate::key::SecretKey;
use aes::Aes256;
use aes_gcm::AesGcm;
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, Payload};
use chacha20poly1305::ChaCha20Poly1305;
use duplex_common::{LoggingTransformer, Result, Stage, StageKind, TransformError};
use std::fmt;

/// AES-256-GCM over an `Aes256` block cipher whose round keys are zeroed on drop
pub type Aes256Gcm = AesGcm<Aes256, U12>;

/// An AEAD primitive usable as a pipeline stage
pub trait AeadCipher: Aead + AeadCore<NonceSize = U12> + KeyInit + Send + Sync {
    /// Algorithm tag written into envelopes
    const ALGORITHM: CipherAlgorithm;
}

impl AeadCipher for Aes256Gcm {
    const ALGORITHM: CipherAlgorithm = CipherAlgorithm::Aes256Gcm;
}

impl AeadCipher for ChaCha20Poly1305 {
    const ALGORITHM: CipherAlgorithm = CipherAlgorithm::ChaCha20Poly1305;
}

/// Cipher stage sealing each payload under a fresh random nonce
///
/// The key is expanded into the cipher instance at construction and is not
/// kept anywhere else by the stage.
pub struct AeadStage<C: AeadCipher> {
    cipher: C,
    aad: Vec<u8>,
}

/// AES-256-GCM stage
pub type AesGcmStage = AeadStage<Aes256Gcm>;

/// ChaCha20-Poly1305 stage
pub type ChaChaStage = AeadStage<ChaCha20Poly1305>;

impl<C: AeadCipher> AeadStage<C> {
    /// Build the stage from a pre-shared key
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidKey`] if the cipher rejects the key.
    pub fn new(key: &SecretKey) -> Result<Self> {
        let material = key.expose_secret();
        let expected = C::ALGORITHM.key_size();
        if material.len() != expected {
            return Err(TransformError::invalid_key_length(expected, material.len()));
        }
        let cipher = C::new_from_slice(material)
            .map_err(|_| TransformError::invalid_key_length(expected, material.len()))?;
        LoggingTransformer::log_stage_created(
            C::ALGORITHM.stage_name(),
            StageKind::Cipher.as_str(),
        );
        Ok(Self {
            cipher,
            aad: Vec::new(),
        })
    }

    /// Bind associated data (e.g. a channel id) into every tag
    ///
    /// The receiving stage must be configured with the same bytes.
    #[must_use]
    pub fn with_aad(mut self, aad: impl Into<Vec<u8>>) -> Self {
        self.aad = aad.into();
        self
    }

    /// Algorithm implemented by this stage
    #[must_use]
    pub fn algorithm(&self) -> CipherAlgorithm {
        C::ALGORITHM
    }

    fn associated_data(&self) -> Vec<u8> {
        let mut ad = Vec::with_capacity(1 + self.aad.len());
        ad.push(C::ALGORITHM.wire_id());
        ad.extend_from_slice(&self.aad);
        ad
    }
}

impl<C: AeadCipher> fmt::Debug for AeadStage<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadStage")
            .field("algorithm", &C::ALGORITHM)
            .field("aad_len", &self.aad.len())
            .finish_non_exhaustive()
    }
}

impl<C: AeadCipher> Stage for AeadStage<C> {
    fn name(&self) -> &str {
        C::ALGORITHM.stage_name()
    }

    fn kind(&self) -> StageKind {
        StageKind::Cipher
    }

    fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
        let nonce = random_nonce();
        let ad = self.associated_data();
        let body = self
            .cipher
            .encrypt(
                Nonce::<C>::from_slice(&nonce),
                Payload {
                    msg: input,
                    aad: &ad,
                },
            )
            .map_err(|_| {
                TransformError::encryption(format!(
                    "{} refused a {}-byte payload",
                    C::ALGORITHM,
                    input.len()
                ))
            })?;
        Ok(Envelope::seal(C::ALGORITHM, &nonce, &body))
    }

    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
        let envelope = Envelope::parse(input)?;
        if envelope.algorithm != C::ALGORITHM {
            return Err(TransformError::authentication_failed(format!(
                "envelope sealed with {}, stage expects {}",
                envelope.algorithm,
                C::ALGORITHM
            )));
        }
        let ad = self.associated_data();
        self.cipher
            .decrypt(
                Nonce::<C>::from_slice(envelope.nonce),
                Payload {
                    msg: envelope.body,
                    aad: &ad,
                },
            )
            .map_err(|_| {
                TransformError::authentication_failed(
                    "tag mismatch (wrong key, tampered data or different associated data)",
                )
            })
    }
}
