//! Capabilities implemented by pipeline stages and sinks

use crate::Result;
use std::fmt;
use std::sync::Arc;

/// Broad family a stage belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StageKind {
    /// Lossless size reduction
    Compression,
    /// Symmetric-key confidentiality transform
    Cipher,
    /// Any other invertible transform supplied by the caller
    Custom,
}

impl StageKind {
    /// Lowercase name of the kind
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compression => "compression",
            Self::Cipher => "cipher",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, invertible transform from bytes to bytes
///
/// Implementations must satisfy `inverse(forward(x)) == x` for every byte
/// sequence `x`, the empty one included. Stages are immutable once built and
/// are shared read-only between pipelines and threads, so both operations
/// take `&self` and must not keep per-call state.
pub trait Stage: Send + Sync + fmt::Debug {
    /// Stable, human-readable stage name (used in logs)
    fn name(&self) -> &str;

    /// Family of the stage
    fn kind(&self) -> StageKind;

    /// Apply the transform in the send direction
    ///
    /// # Errors
    ///
    /// Returns a [`crate::TransformError`] if the input cannot be transformed.
    fn forward(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Undo [`Stage::forward`]
    ///
    /// # Errors
    ///
    /// Returns a [`crate::TransformError`] if the input was not produced by a
    /// matching `forward`, was corrupted, or fails authentication.
    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Shareable stage handle; one stage may sit in a send and a receive pipeline
pub type SharedStage = Arc<dyn Stage>;

impl<S: Stage + ?Sized> Stage for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn kind(&self) -> StageKind {
        (**self).kind()
    }

    fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).forward(input)
    }

    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).inverse(input)
    }
}

/// Terminal consumer of a pipeline's output
///
/// The sink is owned by the caller and only borrowed by a pipeline.
pub trait Sink: Send + Sync {
    /// Hand over the finished bytes
    ///
    /// # Errors
    ///
    /// Sinks that perform I/O report failures as [`crate::TransformError::Io`].
    fn deliver(&self, bytes: Vec<u8>) -> Result<()>;
}

impl<F> Sink for F
where
    F: Fn(Vec<u8>) -> Result<()> + Send + Sync,
{
    fn deliver(&self, bytes: Vec<u8>) -> Result<()> {
        self(bytes)
    }
}

/// Which way data flows through a pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Stages applied first-to-last with `forward`
    Send,
    /// Stages applied last-to-first with `inverse`
    Receive,
}

impl Direction {
    /// Run the operation of `stage` that matches this direction
    ///
    /// # Errors
    ///
    /// Propagates the stage's error unchanged.
    pub fn apply(self, stage: &dyn Stage, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Send => stage.forward(input),
            Self::Receive => stage.inverse(input),
        }
    }

    /// Lowercase name of the direction
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
