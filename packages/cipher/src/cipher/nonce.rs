//! Per-call nonce generation
//!
//! Every encryption draws a fresh 96-bit nonce from the thread-local CSPRNG
//! (`rand::rng()`, reseeded from the OS). Stages keep no counter, so nonces
//! are safe to draw from any number of threads at once. With random 96-bit
//! nonces a single key should seal well under 2^32 messages.

use rand::RngCore;

/// Nonce length in bytes for both supported AEADs
pub const NONCE_LEN: usize = 12;

/// Draw a fresh random nonce
#[must_use]
pub fn random_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);
    nonce
}
