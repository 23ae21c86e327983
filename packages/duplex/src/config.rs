//! Declarative pipeline configuration
//!
//! A configuration names stages in send order. It never carries key
//! material: the key is supplied separately to [`PipelineConfig::build`].
//!
//! JSON form:
//!
//! ```json
//! { "stages": [ { "kind": "lzw" }, { "kind": "aes256gcm", "aad": "channel-7" } ] }
//! ```
//!
//! Compact form, parsed with [`str::parse`]: `"compress,encrypt"` or `"zstd|chacha"`.

use crate::chain::StageChain;
use duplex_cipher::{CipherAlgorithm, SecretKey, cipher_stage};
use duplex_common::{SharedStage, TransformError};
use duplex_compression::CompressionAlgorithm;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading or applying a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A stage name in the compact form is not recognised
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// A cipher stage was configured but no key was supplied
    #[error("Stage {0} requires a key but none was supplied")]
    MissingKey(String),

    /// Building a stage failed
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// One configured stage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum StageConfig {
    /// LZW compression
    Lzw,
    /// Gzip compression
    Gzip {
        /// Level 0-9
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u32>,
    },
    /// Zstandard compression
    Zstd {
        /// Level 1-22
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<i32>,
    },
    /// Bzip2 compression
    Bzip2 {
        /// Level 1-9
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u32>,
    },
    /// AES-256-GCM encryption
    #[serde(rename = "aes256gcm")]
    Aes256Gcm {
        /// Associated data bound into every tag
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aad: Option<String>,
    },
    /// ChaCha20-Poly1305 encryption
    #[serde(rename = "chacha20poly1305")]
    ChaCha20Poly1305 {
        /// Associated data bound into every tag
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aad: Option<String>,
    },
}

impl StageConfig {
    /// Name of the configured stage
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lzw => CompressionAlgorithm::Lzw.name(),
            Self::Gzip { .. } => CompressionAlgorithm::Gzip.name(),
            Self::Zstd { .. } => CompressionAlgorithm::Zstd.name(),
            Self::Bzip2 { .. } => CompressionAlgorithm::Bzip2.name(),
            Self::Aes256Gcm { .. } => CipherAlgorithm::Aes256Gcm.stage_name(),
            Self::ChaCha20Poly1305 { .. } => CipherAlgorithm::ChaCha20Poly1305.stage_name(),
        }
    }

    /// Whether this stage needs a key
    #[must_use]
    pub fn needs_key(&self) -> bool {
        matches!(self, Self::Aes256Gcm { .. } | Self::ChaCha20Poly1305 { .. })
    }

    /// Instantiate the stage
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] for a cipher stage without a key,
    /// or the stage's own construction error.
    pub fn build(&self, key: Option<&SecretKey>) -> Result<SharedStage, ConfigError> {
        let cipher = |algorithm: CipherAlgorithm,
                      aad: Option<&str>|
         -> Result<SharedStage, ConfigError> {
            let key = key.ok_or_else(|| ConfigError::MissingKey(self.name().to_string()))?;
            Ok(cipher_stage(algorithm, key, aad.map(str::as_bytes))?)
        };
        match self {
            Self::Lzw => Ok(CompressionAlgorithm::Lzw.into_stage(None)),
            Self::Gzip { level } => {
                Ok(CompressionAlgorithm::Gzip.into_stage(level.map(signed_level)))
            }
            Self::Zstd { level } => Ok(CompressionAlgorithm::Zstd.into_stage(*level)),
            Self::Bzip2 { level } => {
                Ok(CompressionAlgorithm::Bzip2.into_stage(level.map(signed_level)))
            }
            Self::Aes256Gcm { aad } => cipher(CipherAlgorithm::Aes256Gcm, aad.as_deref()),
            Self::ChaCha20Poly1305 { aad } => {
                cipher(CipherAlgorithm::ChaCha20Poly1305, aad.as_deref())
            }
        }
    }
}

fn signed_level(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}

impl From<CompressionAlgorithm> for StageConfig {
    fn from(algorithm: CompressionAlgorithm) -> Self {
        match algorithm {
            CompressionAlgorithm::Lzw => Self::Lzw,
            CompressionAlgorithm::Gzip => Self::Gzip { level: None },
            CompressionAlgorithm::Zstd => Self::Zstd { level: None },
            CompressionAlgorithm::Bzip2 => Self::Bzip2 { level: None },
        }
    }
}

impl From<CipherAlgorithm> for StageConfig {
    fn from(algorithm: CipherAlgorithm) -> Self {
        match algorithm {
            CipherAlgorithm::Aes256Gcm => Self::Aes256Gcm { aad: None },
            CipherAlgorithm::ChaCha20Poly1305 => Self::ChaCha20Poly1305 { aad: None },
        }
    }
}

impl FromStr for StageConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(algorithm) = s.parse::<CompressionAlgorithm>() {
            return Ok(algorithm.into());
        }
        if let Ok(algorithm) = s.parse::<CipherAlgorithm>() {
            return Ok(algorithm.into());
        }
        Err(ConfigError::UnknownStage(s.trim().to_string()))
    }
}

/// Ordered stage configuration, send order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Stages in send order
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

impl PipelineConfig {
    /// Parse the JSON form
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the JSON form
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether any configured stage needs a key
    #[must_use]
    pub fn needs_key(&self) -> bool {
        self.stages.iter().any(StageConfig::needs_key)
    }

    /// Instantiate every stage and return the chain
    ///
    /// Every cipher stage is built from the same `key`.
    ///
    /// # Errors
    ///
    /// Returns the first stage construction error.
    pub fn build(&self, key: Option<&SecretKey>) -> Result<StageChain, ConfigError> {
        let stages = self
            .stages
            .iter()
            .map(|stage| stage.build(key))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StageChain::new(stages))
    }
}

impl FromStr for PipelineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stages = s
            .split([',', '|'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse::<StageConfig>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stages })
    }
}
