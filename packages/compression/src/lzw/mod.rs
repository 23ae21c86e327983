//! LZW compression stage
//!
//! `forward` output is the raw LZW stream followed by a 4-byte little-endian
//! xxHash32 (seed 0) of the uncompressed input. `inverse` decodes the stream
//! and rejects it unless the recomputed checksum matches, so a damaged stream
//! surfaces as [`TransformError::Corrupt`] instead of wrong bytes.

pub mod codec;

pub use codec::{decode, encode};

use duplex_common::{LoggingTransformer, Result, Stage, StageKind, TransformError};
use twox_hash::XxHash32;

const CHECKSUM_LEN: usize = 4;
const CHECKSUM_SEED: u32 = 0;

/// Lossless LZW stage with an integrity trailer
#[derive(Clone, Copy, Debug)]
pub struct LzwStage;

impl LzwStage {
    /// Create the stage
    #[must_use]
    pub fn new() -> Self {
        LoggingTransformer::log_stage_created("lzw", StageKind::Compression.as_str());
        Self
    }
}

impl Default for LzwStage {
    fn default() -> Self {
        Self::new()
    }
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    XxHash32::oneshot(CHECKSUM_SEED, data).to_le_bytes()
}

impl Stage for LzwStage {
    fn name(&self) -> &str {
        "lzw"
    }

    fn kind(&self) -> StageKind {
        StageKind::Compression
    }

    fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = encode(input);
        out.extend_from_slice(&checksum(input));
        Ok(out)
    }

    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
        let split = input
            .len()
            .checked_sub(CHECKSUM_LEN)
            .ok_or_else(|| TransformError::corrupt("LZW frame shorter than its checksum"))?;
        let (stream, trailer) = input.split_at(split);

        let decoded = decode(stream)?;
        if checksum(&decoded)[..] != *trailer {
            return Err(TransformError::corrupt("LZW checksum mismatch"));
        }
        Ok(decoded)
    }
}
