//! Compression algorithm identifiers

use crate::{Bzip2Stage, GzipStage, LzwStage, ZstdStage};
use duplex_common::SharedStage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Supported compression algorithms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Variable-width LZW with an xxHash32 integrity trailer
    #[default]
    Lzw,
    /// Gzip (DEFLATE), levels 0-9
    Gzip,
    /// Zstandard, levels 1-22
    Zstd,
    /// Bzip2, levels 1-9
    Bzip2,
}

impl CompressionAlgorithm {
    /// Get the lowercase name of the algorithm
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lzw => "lzw",
            Self::Gzip => "gzip",
            Self::Zstd => "zstd",
            Self::Bzip2 => "bzip2",
        }
    }

    /// Whether the algorithm takes a compression level
    #[must_use]
    pub fn has_levels(self) -> bool {
        !matches!(self, Self::Lzw)
    }

    /// All supported algorithms
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Lzw, Self::Gzip, Self::Zstd, Self::Bzip2]
    }

    /// Build a shareable stage for this algorithm
    ///
    /// `level` is ignored for LZW; `None` selects the algorithm default.
    #[must_use]
    pub fn into_stage(self, level: Option<i32>) -> SharedStage {
        let unsigned = |default: u32| level.map_or(default, |l| l.max(0).unsigned_abs());
        match self {
            Self::Lzw => Arc::new(LzwStage::new()),
            Self::Gzip => Arc::new(GzipStage::new(unsigned(crate::gzip::DEFAULT_LEVEL))),
            Self::Zstd => Arc::new(ZstdStage::new(level.unwrap_or(crate::zstd::DEFAULT_LEVEL))),
            Self::Bzip2 => Arc::new(Bzip2Stage::new(unsigned(crate::bzip2::DEFAULT_LEVEL))),
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported compression algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for CompressionAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lzw" | "compress" | "zip" => Ok(Self::Lzw),
            "gzip" | "gz" | "deflate" => Ok(Self::Gzip),
            "zstd" | "zstandard" | "zst" => Ok(Self::Zstd),
            "bzip2" | "bz2" | "bzip" => Ok(Self::Bzip2),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
