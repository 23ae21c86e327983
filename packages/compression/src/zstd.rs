//! Zstd compression stage

use duplex_common::{LoggingTransformer, Result, Stage, StageKind, TransformError};

/// Default zstd level
pub const DEFAULT_LEVEL: i32 = 3;

/// Compress data using zstd (levels are clamped to 1-22)
///
/// # Errors
/// Returns [`TransformError::Io`] if the encoder fails
pub fn compress(data: &[u8], level: i32) -> Result<Vec<u8>> {
    Ok(zstd::encode_all(data, level.clamp(1, 22))?)
}

/// Decompress zstd data
///
/// # Errors
/// Returns [`TransformError::Corrupt`] if the input is not a valid zstd frame
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    zstd::decode_all(data)
        .map_err(|e| TransformError::corrupt(format!("Zstd decompression failed: {e}")))
}

/// Zstandard stage
#[derive(Clone, Debug)]
pub struct ZstdStage {
    level: i32,
}

impl ZstdStage {
    /// Create the stage with a compression level (1-22)
    #[must_use]
    pub fn new(level: i32) -> Self {
        LoggingTransformer::log_stage_created("zstd", StageKind::Compression.as_str());
        Self {
            level: level.clamp(1, 22),
        }
    }

    /// Configured compression level
    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdStage {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl Stage for ZstdStage {
    fn name(&self) -> &str {
        "zstd"
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
