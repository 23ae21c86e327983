//! Stage and sink capability contract

use duplex_common::{Direction, SharedStage, Sink, Stage, StageKind, TransformError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reverses the payload; its own inverse
#[derive(Debug)]
struct Reverse;

impl Stage for Reverse {
    fn name(&self) -> &str {
        "reverse"
    }

    fn kind(&self) -> StageKind {
        StageKind::Custom
    }

    fn forward(&self, input: &[u8]) -> duplex_common::Result<Vec<u8>> {
        Ok(input.iter().rev().copied().collect())
    }

    fn inverse(&self, input: &[u8]) -> duplex_common::Result<Vec<u8>> {
        self.forward(input)
    }
}

/// Refuses everything it is asked to undo
#[derive(Debug)]
struct Refuse;

impl Stage for Refuse {
    fn name(&self) -> &str {
        "refuse"
    }

    fn kind(&self) -> StageKind {
        StageKind::Custom
    }

    fn forward(&self, input: &[u8]) -> duplex_common::Result<Vec<u8>> {
        Ok(input.to_vec())
    }

    fn inverse(&self, _input: &[u8]) -> duplex_common::Result<Vec<u8>> {
        Err(TransformError::corrupt("refused"))
    }
}

#[test]
fn test_direction_selects_forward_or_inverse() {
    let stage = Refuse;
    assert_eq!(Direction::Send.apply(&stage, b"abc").expect("forward succeeds"), b"abc");
    assert!(matches!(
        Direction::Receive.apply(&stage, b"abc"),
        Err(TransformError::Corrupt(_))
    ));
}

#[test]
fn test_shared_stage_delegates() {
    let shared: SharedStage = Arc::new(Reverse);
    assert_eq!(shared.name(), "reverse");
    assert_eq!(shared.kind(), StageKind::Custom);
    let sent = shared.forward(b"duplex").expect("forward succeeds");
    assert_eq!(sent, b"xelpud");
    assert_eq!(shared.inverse(&sent).expect("inverse succeeds"), b"duplex");
}

#[test]
fn test_closure_is_a_sink() {
    let calls = AtomicUsize::new(0);
    let sink = |bytes: Vec<u8>| -> duplex_common::Result<()> {
        assert_eq!(bytes, b"payload");
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    };
    let dyn_sink: &dyn Sink = &sink;
    dyn_sink.deliver(b"payload".to_vec()).expect("delivery succeeds");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_io_errors_convert_and_label() {
    let err: TransformError = std::io::Error::other("disk full").into();
    assert_eq!(err.label(), "io");
    assert!(!err.is_integrity_failure());
    assert!(err.to_string().contains("disk full"));

    assert!(TransformError::corrupt("x").is_integrity_failure());
    assert!(TransformError::authentication_failed("x").is_integrity_failure());
    assert_eq!(TransformError::invalid_key_length(32, 5).label(), "invalid_key");
    assert_eq!(
        TransformError::invalid_key_length(32, 5).to_string(),
        "Invalid key: expected 32 bytes, got 5"
    );
}

#[test]
fn test_kind_and_direction_display() {
    assert_eq!(StageKind::Compression.to_string(), "compression");
    assert_eq!(StageKind::Cipher.to_string(), "cipher");
    assert_eq!(Direction::Send.to_string(), "send");
    assert_eq!(Direction::Receive.to_string(), "receive");
}
