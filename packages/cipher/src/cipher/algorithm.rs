//! Cipher algorithm definitions and metadata

use super::envelope::TAG_LEN;
use super::nonce::NONCE_LEN;
use crate::key::KEY_LEN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported cipher algorithms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    /// AES-256-GCM (Advanced Encryption Standard with Galois/Counter Mode)
    ///
    /// - 256-bit key size
    /// - 96-bit nonce
    /// - 128-bit authentication tag
    /// - Hardware acceleration on modern CPUs
    #[serde(rename = "aes256gcm")]
    #[default]
    Aes256Gcm,

    /// ChaCha20-Poly1305 (`ChaCha20` stream cipher with Poly1305 MAC)
    ///
    /// - 256-bit key size
    /// - 96-bit nonce
    /// - 128-bit authentication tag
    /// - Constant-time implementation
    #[serde(rename = "chacha20poly1305")]
    ChaCha20Poly1305,
}

impl CipherAlgorithm {
    /// Get the human-readable name of the algorithm
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "AES-256-GCM",
            Self::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        }
    }

    /// Stage name used in logs and pipeline listings
    #[must_use]
    pub fn stage_name(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes256gcm",
            Self::ChaCha20Poly1305 => "chacha20poly1305",
        }
    }

    /// Identifier byte written at the start of every envelope
    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::Aes256Gcm => 0x01,
            Self::ChaCha20Poly1305 => 0x02,
        }
    }

    /// Reverse of [`CipherAlgorithm::wire_id`]
    #[must_use]
    pub fn from_wire_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(Self::Aes256Gcm),
            0x02 => Some(Self::ChaCha20Poly1305),
            _ => None,
        }
    }

    /// Key size in bytes required for this algorithm
    #[must_use]
    pub fn key_size(self) -> usize {
        KEY_LEN
    }

    /// Nonce size in bytes carried in the envelope header
    #[must_use]
    pub fn nonce_size(self) -> usize {
        NONCE_LEN
    }

    /// Authentication tag size in bytes
    #[must_use]
    pub fn tag_size(self) -> usize {
        TAG_LEN
    }

    /// Get all supported algorithms
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Aes256Gcm, Self::ChaCha20Poly1305]
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown cipher name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported cipher algorithm: {0}")]
pub struct UnknownCipher(pub String);

impl FromStr for CipherAlgorithm {
    type Err = UnknownCipher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "encrypt" | "aes" | "aes256" | "aes256gcm" | "aes-256-gcm" => Ok(Self::Aes256Gcm),
            "chacha" | "chacha20" | "chacha20poly1305" | "chacha20-poly1305" => {
                Ok(Self::ChaCha20Poly1305)
            }
            _ => Err(UnknownCipher(s.to_string())),
        }
    }
}
