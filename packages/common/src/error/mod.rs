//! Error taxonomy shared by every stage and sink
//!
//! A failure is fatal to the current pipeline run and nothing else: it is
//! returned to the caller, never raised as a panic.

pub mod constructors;
pub mod logging;
pub mod types;

pub use logging::LoggingTransformer;
pub use types::{Result, TransformError};
