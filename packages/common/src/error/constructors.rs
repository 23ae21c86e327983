//! Error constructors and classification helpers

use super::types::TransformError;
use std::fmt;

impl TransformError {
    /// Create a `Corrupt` error with a formatted message
    #[must_use]
    pub fn corrupt(msg: impl fmt::Display) -> Self {
        Self::Corrupt(msg.to_string())
    }

    /// Create an `AuthenticationFailed` error with a formatted message
    #[must_use]
    pub fn authentication_failed(msg: impl fmt::Display) -> Self {
        Self::AuthenticationFailed(msg.to_string())
    }

    /// Create an `Encryption` error with a formatted message
    #[must_use]
    pub fn encryption(msg: impl fmt::Display) -> Self {
        Self::Encryption(msg.to_string())
    }

    /// Create an `InvalidKey` error with a formatted message
    #[must_use]
    pub fn invalid_key(msg: impl fmt::Display) -> Self {
        Self::InvalidKey(msg.to_string())
    }

    /// Create an `InvalidKey` error from the expected and supplied lengths
    #[must_use]
    pub fn invalid_key_length(expected: usize, actual: usize) -> Self {
        Self::InvalidKey(format!("expected {expected} bytes, got {actual}"))
    }

    /// Short, stable label for the error variant, safe to log
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Corrupt(_) => "corrupt",
            Self::InvalidKey(_) => "invalid_key",
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::Encryption(_) => "encryption",
            Self::Io(_) => "io",
        }
    }

    /// True for errors raised while checking the integrity of received data
    #[must_use]
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::Corrupt(_) | Self::AuthenticationFailed(_))
    }
}
