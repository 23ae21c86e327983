//! Pipeline composition and the single driver loop
//!
//! A pipeline is an ordered list of stage handles plus a borrowed sink. The
//! send pipeline runs `forward` first-to-last; the receive pipeline is built
//! from the same list and runs `inverse` last-to-first. Reversal happens once,
//! at construction.

use duplex_common::{Direction, LoggingTransformer, Result, SharedStage, Sink};
use std::borrow::Cow;
use std::fmt;

/// Ordered stages wired to a sink for one direction
pub struct Pipeline<'s> {
    direction: Direction,
    stages: Vec<SharedStage>,
    sink: &'s dyn Sink,
}

/// Build the send pipeline: `S1.forward -> ... -> Sn.forward -> sink`
#[must_use]
pub fn build_send_pipeline<'s>(stages: &[SharedStage], sink: &'s dyn Sink) -> Pipeline<'s> {
    Pipeline::new(Direction::Send, stages.to_vec(), sink)
}

/// Build the receive pipeline: `Sn.inverse -> ... -> S1.inverse -> sink`
///
/// `stages` is given in send order, exactly as for [`build_send_pipeline`].
#[must_use]
pub fn build_receive_pipeline<'s>(stages: &[SharedStage], sink: &'s dyn Sink) -> Pipeline<'s> {
    Pipeline::new(Direction::Receive, stages.iter().rev().cloned().collect(), sink)
}

impl<'s> Pipeline<'s> {
    fn new(direction: Direction, stages: Vec<SharedStage>, sink: &'s dyn Sink) -> Self {
        tracing::debug!(
            "Built {direction} pipeline with {} stage(s): {}",
            stages.len(),
            stages
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        Self {
            direction,
            stages,
            sink,
        }
    }

    /// Drive `payload` through every stage and deliver the result to the sink
    ///
    /// The sink is called exactly once on success and never on failure.
    ///
    /// # Errors
    ///
    /// Returns the first stage error, or the sink's own error.
    pub fn run(&self, payload: &[u8]) -> Result<()> {
        let output = self.transform(payload)?;
        let len = output.len();
        self.sink.deliver(output)?;
        tracing::debug!(
            "{} pipeline delivered {len} bytes (input {} bytes)",
            self.direction,
            payload.len()
        );
        Ok(())
    }

    /// Drive `payload` through every stage and return the result
    ///
    /// Intermediate buffers belong to this call only and are dropped as soon
    /// as the next stage has consumed them.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; later stages are not invoked.
    pub fn transform(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut current = Cow::Borrowed(payload);
        for stage in &self.stages {
            let output = self
                .direction
                .apply(&**stage, &current)
                .inspect_err(|e| {
                    LoggingTransformer::log_stage_failure(stage.name(), self.direction.as_str(), e);
                })?;
            LoggingTransformer::log_stage_step(
                stage.name(),
                self.direction.as_str(),
                current.len(),
                output.len(),
            );
            current = Cow::Owned(output);
        }
        Ok(current.into_owned())
    }

    /// Direction this pipeline runs in
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Stage names in execution order
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Number of stages
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True for the identity pipeline
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("direction", &self.direction)
            .field("stages", &self.stage_names())
            .finish_non_exhaustive()
    }
}
