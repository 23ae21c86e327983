//! Stock sinks
//!
//! Any `Fn(Vec<u8>) -> Result<()>` closure is also a sink.

use arc_swap::ArcSwapOption;
use duplex_common::{Result, Sink};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Keeps the most recently delivered payload in memory
#[derive(Default)]
pub struct MemorySink {
    last: ArcSwapOption<Vec<u8>>,
    deliveries: AtomicUsize,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the last delivered payload
    #[must_use]
    pub fn last(&self) -> Option<Vec<u8>> {
        self.last.load_full().map(|bytes| bytes.as_ref().clone())
    }

    /// Remove and return the last delivered payload
    #[must_use]
    pub fn take(&self) -> Option<Vec<u8>> {
        self.last
            .swap(None)
            .map(|bytes| Arc::try_unwrap(bytes).unwrap_or_else(|shared| shared.as_ref().clone()))
    }

    /// Number of successful deliveries so far
    #[must_use]
    pub fn deliveries(&self) -> usize {
        self.deliveries.load(Ordering::Acquire)
    }
}

impl Sink for MemorySink {
    fn deliver(&self, bytes: Vec<u8>) -> Result<()> {
        self.last.store(Some(Arc::new(bytes)));
        self.deliveries.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("holding", &self.last.load().as_ref().map(|b| b.len()))
            .field("deliveries", &self.deliveries())
            .finish()
    }
}

/// Drops everything it receives, counting bytes
#[derive(Debug, Default)]
pub struct DiscardSink {
    bytes: AtomicUsize,
}

impl DiscardSink {
    /// Create the sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes discarded so far
    #[must_use]
    pub fn bytes_discarded(&self) -> usize {
        self.bytes.load(Ordering::Relaxed)
    }
}

impl Sink for DiscardSink {
    fn deliver(&self, bytes: Vec<u8>) -> Result<()> {
        self.bytes.fetch_add(bytes.len(), Ordering::Relaxed);
        Ok(())
    }
}
