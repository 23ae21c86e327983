//! Shared infrastructure for the duplex crates
//!
//! This crate defines the two capabilities every other crate is written
//! against:
//! - [`Stage`]: an invertible byte transform (`forward` / `inverse`)
//! - [`Sink`]: the terminal consumer of a pipeline's output
//!
//! together with the [`TransformError`] taxonomy and the logging bootstrap.
//! Compression and cipher crates depend on this crate only, never on each
//! other.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

pub use error::{LoggingTransformer, Result, TransformError};
pub use traits::{Direction, SharedStage, Sink, Stage, StageKind};
