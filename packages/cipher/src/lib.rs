//! # Duplex Cipher
//!
//! Symmetric encryption stages for duplex pipelines.
//!
//! - [`AesGcmStage`] - AES-256-GCM (default)
//! - [`ChaChaStage`] - ChaCha20-Poly1305
//!
//! Both seal every payload under a fresh random 96-bit nonce, so encrypting
//! the same plaintext twice never yields the same bytes, and both reject any
//! ciphertext whose tag does not verify. Keys are [`SecretKey`] values:
//! validated at construction, redacted in `Debug`, zeroed on drop.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

/// Encryption stages, envelope format and nonce generation
pub mod cipher;
pub mod key;

pub use cipher::{
    AeadCipher, AeadStage, AesGcmStage, ChaChaStage, CipherAlgorithm, UnknownCipher, cipher_stage,
};
pub use key::{KEY_LEN, SecretKey};

pub use duplex_common::{Result, Stage, StageKind, TransformError};
