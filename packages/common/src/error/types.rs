//! Core error types and definitions

use thiserror::Error;

/// Errors produced by stages, sinks and the pipeline driver
#[derive(Debug, Error)]
pub enum TransformError {
    /// Compressed stream malformed, truncated or failing its integrity check
    #[error("Corrupt stream: {0}")]
    Corrupt(String),

    /// Cipher key unusable (wrong length or encoding)
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Ciphertext failed authentication or could not be decrypted
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Sealing failed (the cipher refused the input, e.g. it exceeds size limits)
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// I/O failure raised by a sink or a streaming encoder
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`TransformError`]
pub type Result<T> = std::result::Result<T, TransformError>;
