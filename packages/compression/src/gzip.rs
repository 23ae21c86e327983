//! Gzip compression stage

use duplex_common::{LoggingTransformer, Result, Stage, StageKind, TransformError};
use flate2::Compression;
use flate2::read::{GzDecoder, GzEncoder};
use std::io::Read;

/// Default gzip level
pub const DEFAULT_LEVEL: u32 = 6;

/// Compress data using gzip
///
/// Levels above 9 are treated as 9.
///
/// # Errors
/// Returns [`TransformError::Io`] if the encoder fails
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(data, Compression::new(level.min(9)));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed)?;
    Ok(compressed)
}

/// Decompress gzip data
///
/// # Errors
/// Returns [`TransformError::Corrupt`] if the input is not a valid gzip member
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| TransformError::corrupt(format!("Gzip decompression failed: {e}")))?;
    Ok(decompressed)
}

/// Gzip (DEFLATE) stage
#[derive(Clone, Debug)]
pub struct GzipStage {
    level: u32,
}

impl GzipStage {
    /// Create the stage with a compression level (0-9)
    #[must_use]
    pub fn new(level: u32) -> Self {
        LoggingTransformer::log_stage_created("gzip", StageKind::Compression.as_str());
        Self { level: level.min(9) }
    }

    /// Configured compression level
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for GzipStage {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl Stage for GzipStage {
    fn name(&self) -> &str {
        "gzip"
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
