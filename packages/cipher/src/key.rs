//! Pre-shared symmetric key material

use base64::{Engine as _, engine::general_purpose::STANDARD};
use duplex_common::{Result, TransformError};
use rand::RngCore;
use zeroize::Zeroizing;

/// Key length in bytes for every supported cipher (256 bits)
pub const KEY_LEN: usize = 32;

/// Opaque 256-bit secret, zeroed on drop
///
/// The length is validated when the key is built. There is no `Display` and
/// `Debug` is redacted; the bytes are only reachable through
/// [`SecretKey::expose_secret`].
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    /// Build a key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidKey`] unless exactly [`KEY_LEN`] bytes are supplied.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.len() != KEY_LEN {
            return Err(TransformError::invalid_key_length(KEY_LEN, bytes.len()));
        }
        Ok(Self(bytes))
    }

    /// Build a key from a hex string (surrounding whitespace ignored)
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidKey`] if the string is not valid hex or
    /// does not decode to [`KEY_LEN`] bytes.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        // Decoder errors can quote key characters, so they are not forwarded.
        let bytes = hex::decode(encoded.trim())
            .map_err(|_| TransformError::invalid_key("key is not valid hex"))?;
        Self::from_bytes(bytes)
    }

    /// Build a key from a standard base64 string (surrounding whitespace ignored)
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidKey`] if the string is not valid base64
    /// or does not decode to [`KEY_LEN`] bytes.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| TransformError::invalid_key("key is not valid base64"))?;
        Self::from_bytes(bytes)
    }

    /// Generate a fresh random key from the thread-local CSPRNG
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; KEY_LEN]);
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Borrow the raw key bytes
    #[must_use]
    pub fn expose_secret(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey(REDACTED)")
    }
}
