//! Bzip2 compression stage

use bzip2::Compression;
use bzip2::read::{BzDecoder, BzEncoder};
use duplex_common::{LoggingTransformer, Result, Stage, StageKind, TransformError};
use std::io::Read;

/// Default bzip2 level (block size in 100k units)
pub const DEFAULT_LEVEL: u32 = 6;

/// Compress data using bzip2 (levels are clamped to 1-9)
///
/// # Errors
/// Returns [`TransformError::Io`] if the encoder fails
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = BzEncoder::new(data, Compression::new(level.clamp(1, 9)));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed)?;
    Ok(compressed)
}

/// Decompress bzip2 data
///
/// # Errors
/// Returns [`TransformError::Corrupt`] if the input is not a valid bzip2 stream
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = BzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| TransformError::corrupt(format!("Bzip2 decompression failed: {e}")))?;
    Ok(decompressed)
}

/// Bzip2 stage
#[derive(Clone, Debug)]
pub struct Bzip2Stage {
    level: u32,
}

impl Bzip2Stage {
    /// Create the stage with a compression level (1-9)
    #[must_use]
    pub fn new(level: u32) -> Self {
        LoggingTransformer::log_stage_created("bzip2", StageKind::Compression.as_str());
        Self {
            level: level.clamp(1, 9),
        }
    }

    /// Configured compression level
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for Bzip2Stage {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl Stage for Bzip2Stage {
    fn name(&self) -> &str {
        "bzip2"
    }

    fn kind(&self) -> StageKind {
        StageKind::Compression
    }

    fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
        compress(input, self.level)
    }

    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }
}
