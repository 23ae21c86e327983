//! Ciphertext envelope layout
//!
//! ```text
//! [alg id: 1][nonce: 12][ciphertext || tag: 16]
//! ```
//!
//! The algorithm id byte is also bound into the associated data, so changing
//! it invalidates the tag.

use super::CipherAlgorithm;
use super::nonce::NONCE_LEN;
use duplex_common::{Result, TransformError};

/// Header length: algorithm id plus nonce (see [`CipherAlgorithm::nonce_size`])
pub const HEADER_LEN: usize = 1 + NONCE_LEN;
/// AEAD tag length (see [`CipherAlgorithm::tag_size`])
pub const TAG_LEN: usize = 16;

/// Borrowed view of a parsed envelope
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    /// Algorithm named by the header
    pub algorithm: CipherAlgorithm,
    /// Nonce used to seal the body
    pub nonce: &'a [u8],
    /// Ciphertext followed by the tag
    pub body: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split `bytes` into header fields and body
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::AuthenticationFailed`] if the input is too
    /// short to hold a header and tag, or names an unknown algorithm.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let (&id, rest) = bytes
            .split_first()
            .ok_or_else(|| TransformError::authentication_failed("empty envelope"))?;
        let algorithm = CipherAlgorithm::from_wire_id(id).ok_or_else(|| {
            TransformError::authentication_failed(format!("unknown cipher id {id:#04x}"))
        })?;
        if rest.len() < algorithm.nonce_size() + algorithm.tag_size() {
            return Err(TransformError::authentication_failed(format!(
                "envelope of {} bytes is shorter than header and tag",
                bytes.len()
            )));
        }
        let (nonce, body) = rest.split_at(algorithm.nonce_size());
        Ok(Self {
            algorithm,
            nonce,
            body,
        })
    }

    /// Assemble an envelope from its parts
    #[must_use]
    pub fn seal(algorithm: CipherAlgorithm, nonce: &[u8; NONCE_LEN], body: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + algorithm.nonce_size() + body.len());
        out.push(algorithm.wire_id());
        out.extend_from_slice(nonce);
        out.extend_from_slice(body);
        out
    }
}
