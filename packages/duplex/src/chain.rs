//! Stage sets fixed at build time, and the send/receive pair built from them

use crate::pipeline::{Pipeline, build_receive_pipeline, build_send_pipeline};
use duplex_cipher::{CipherAlgorithm, SecretKey, cipher_stage};
use duplex_common::{Result, SharedStage, Sink, Stage};
use duplex_compression::CompressionAlgorithm;
use std::sync::Arc;

/// Immutable, ordered set of stages in send order
///
/// Cloning a chain clones stage handles, not stages: a send pipeline and its
/// receive pipeline share the same stage instances (and so the same key).
#[derive(Clone, Debug, Default)]
pub struct StageChain {
    stages: Vec<SharedStage>,
}

impl StageChain {
    /// Chain from stage handles already in send order
    #[must_use]
    pub fn new(stages: Vec<SharedStage>) -> Self {
        Self { stages }
    }

    /// Start a fluent builder
    #[must_use]
    pub fn builder() -> StageChainBuilder {
        StageChainBuilder::default()
    }

    /// Stage handles in send order
    #[must_use]
    pub fn stages(&self) -> &[SharedStage] {
        &self.stages
    }

    /// Stage names in send order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Number of stages
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True if the chain has no stages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Send pipeline delivering to `sink`
    #[must_use]
    pub fn send<'s>(&self, sink: &'s dyn Sink) -> Pipeline<'s> {
        build_send_pipeline(&self.stages, sink)
    }

    /// Receive pipeline delivering to `sink`
    #[must_use]
    pub fn receive<'s>(&self, sink: &'s dyn Sink) -> Pipeline<'s> {
        build_receive_pipeline(&self.stages, sink)
    }

    /// Matching send/receive pair for one logical channel
    #[must_use]
    pub fn channel<'s>(&self, outbound: &'s dyn Sink, inbound: &'s dyn Sink) -> Channel<'s> {
        Channel {
            sender: self.send(outbound),
            receiver: self.receive(inbound),
        }
    }
}

/// Fluent builder for [`StageChain`]
#[derive(Debug, Default)]
pub struct StageChainBuilder {
    stages: Vec<SharedStage>,
}

impl StageChainBuilder {
    /// Append a stage
    #[must_use]
    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Append an existing shared stage handle
    #[must_use]
    pub fn shared(mut self, stage: SharedStage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append the default LZW compressor
    #[must_use]
    pub fn compress(self) -> Self {
        self.compress_with(CompressionAlgorithm::Lzw, None)
    }

    /// Append a compressor of the given algorithm and level
    #[must_use]
    pub fn compress_with(self, algorithm: CompressionAlgorithm, level: Option<i32>) -> Self {
        self.shared(algorithm.into_stage(level))
    }

    /// Append the default AES-256-GCM cipher
    ///
    /// # Errors
    ///
    /// Returns [`duplex_common::TransformError::InvalidKey`] if the key is rejected.
    pub fn encrypt(self, key: &SecretKey) -> Result<Self> {
        self.encrypt_with(CipherAlgorithm::Aes256Gcm, key, None)
    }

    /// Append a cipher of the given algorithm, optionally binding associated data
    ///
    /// # Errors
    ///
    /// Returns [`duplex_common::TransformError::InvalidKey`] if the key is rejected.
    pub fn encrypt_with(
        self,
        algorithm: CipherAlgorithm,
        key: &SecretKey,
        aad: Option<&[u8]>,
    ) -> Result<Self> {
        Ok(self.shared(cipher_stage(algorithm, key, aad)?))
    }

    /// Finish the chain
    #[must_use]
    pub fn build(self) -> StageChain {
        StageChain::new(self.stages)
    }
}

/// Send and receive pipelines built from one chain
#[derive(Debug)]
pub struct Channel<'s> {
    sender: Pipeline<'s>,
    receiver: Pipeline<'s>,
}

impl<'s> Channel<'s> {
    /// Run the send pipeline
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`].
    pub fn send(&self, payload: &[u8]) -> Result<()> {
        self.sender.run(payload)
    }

    /// Run the receive pipeline
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`].
    pub fn receive(&self, payload: &[u8]) -> Result<()> {
        self.receiver.run(payload)
    }

    /// The send half
    #[must_use]
    pub fn sender(&self) -> &Pipeline<'s> {
        &self.sender
    }

    /// The receive half
    #[must_use]
    pub fn receiver(&self) -> &Pipeline<'s> {
        &self.receiver
    }
}
