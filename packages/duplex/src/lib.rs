//! # Duplex
//!
//! Composable, bidirectional byte pipelines. A pipeline chains invertible
//! stages (compression, encryption, or anything implementing [`Stage`]):
//!
//! - the send pipeline applies `forward` of each stage first-to-last
//! - the receive pipeline, built from the same stage list, applies `inverse`
//!   last-to-first
//!
//! so that receiving what was sent reproduces the original bytes exactly.
//! The first failing stage aborts the run and nothing reaches the sink.
//!
//! ## Example
//!
//! ```rust
//! use duplex::prelude::*;
//!
//! # fn main() -> Result<(), duplex::TransformError> {
//! let key = SecretKey::generate();
//! let chain = Duplex::chain().compress().encrypt(&key)?.build();
//!
//! let wire = MemorySink::new();
//! let inbox = MemorySink::new();
//! chain.send(&wire).run(b"Hello World")?;
//! chain.receive(&inbox).run(&wire.take().unwrap_or_default())?;
//!
//! assert_eq!(inbox.take().as_deref(), Some(&b"Hello World"[..]));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod chain;
pub mod config;
pub mod pipeline;
pub mod sink;

pub use chain::{Channel, StageChain, StageChainBuilder};
pub use config::{ConfigError, PipelineConfig, StageConfig};
pub use pipeline::{Pipeline, build_receive_pipeline, build_send_pipeline};
pub use sink::{DiscardSink, MemorySink};

pub use duplex_cipher::{
    AesGcmStage, ChaChaStage, CipherAlgorithm, KEY_LEN, SecretKey, cipher_stage,
};
pub use duplex_common::{
    Direction, LoggingTransformer, Result, SharedStage, Sink, Stage, StageKind, TransformError,
};
pub use duplex_compression::{
    Bzip2Stage, CompressionAlgorithm, GzipStage, LzwStage, ZstdStage,
};

/// Main entry point
pub struct Duplex;

impl Duplex {
    /// Start building a stage chain
    #[must_use]
    pub fn chain() -> StageChainBuilder {
        StageChain::builder()
    }

    /// Build a chain from a configuration
    ///
    /// # Errors
    ///
    /// See [`PipelineConfig::build`].
    pub fn from_config(
        config: &PipelineConfig,
        key: Option<&SecretKey>,
    ) -> std::result::Result<StageChain, ConfigError> {
        config.build(key)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Channel, Direction, Duplex, MemorySink, Pipeline, PipelineConfig, SecretKey, SharedStage,
        Sink, Stage, StageChain, StageKind, TransformError, build_receive_pipeline,
        build_send_pipeline,
    };
}
