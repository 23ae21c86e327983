//! Structured logging bootstrap
//!
//! Library code emits `tracing` events; with the `log` feature enabled those
//! events are forwarded to whichever `log` backend is installed. This module
//! installs `env_logger` as that backend.

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging setup and the few structured events shared by all crates
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Levels are controlled through `RUST_LOG`:
    /// - `RUST_LOG=debug` - pipeline runs and stage construction
    /// - `RUST_LOG=trace` - per-stage byte counts
    /// - `RUST_LOG=duplex=debug,duplex_cipher=warn` - per-crate levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            log::info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are no-ops.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Record that a stage was constructed
    pub fn log_stage_created(name: &str, kind: &str) {
        tracing::debug!("Stage constructed: {name} (kind: {kind})");
    }

    /// Record a stage failure without exposing payload or key material
    pub fn log_stage_failure(stage: &str, direction: &str, error: &crate::TransformError) {
        tracing::warn!(
            "Stage {stage} failed during {direction}: {} ({error})",
            error.label()
        );
    }

    /// Record the byte counts of a single stage step
    pub fn log_stage_step(stage: &str, direction: &str, input_len: usize, output_len: usize) {
        tracing::trace!("Stage {stage} {direction}: {input_len} -> {output_len} bytes");
    }
}
