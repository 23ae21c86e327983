//! Stream compressor stages and algorithm selection

use duplex_compression::{
    Bzip2Stage, CompressionAlgorithm, GzipStage, LzwStage, Stage, TransformError, ZstdStage,
};
use std::sync::Arc;

fn sample() -> Vec<u8> {
    b"This is a much larger piece of text data that should compress well. ".repeat(40)
}

fn stages() -> Vec<Arc<dyn Stage>> {
    vec![
        Arc::new(LzwStage::default()),
        Arc::new(GzipStage::default()),
        Arc::new(ZstdStage::default()),
        Arc::new(Bzip2Stage::default()),
    ]
}

#[test]
fn test_every_compressor_roundtrips() {
    let data = sample();
    for stage in stages() {
        let compressed = stage.forward(&data).expect("forward");
        assert!(
            compressed.len() < data.len(),
            "{} should shrink repetitive text",
            stage.name()
        );
        assert_eq!(stage.inverse(&compressed).expect("inverse"), data, "{}", stage.name());
    }
}

#[test]
fn test_every_compressor_roundtrips_empty_input() {
    for stage in stages() {
        let compressed = stage.forward(b"").expect("forward");
        assert_eq!(stage.inverse(&compressed).expect("inverse"), b"", "{}", stage.name());
    }
}

#[test]
fn test_garbage_is_reported_as_corrupt() {
    let garbage = b"definitely not a compressed stream".to_vec();
    for stage in stages() {
        let result = stage.inverse(&garbage);
        assert!(
            matches!(result, Err(TransformError::Corrupt(_))),
            "{} accepted garbage",
            stage.name()
        );
    }
}

#[test]
fn test_levels_are_clamped() {
    assert_eq!(GzipStage::new(42).level(), 9);
    assert_eq!(ZstdStage::new(0).level(), 1);
    assert_eq!(ZstdStage::new(99).level(), 22);
    assert_eq!(Bzip2Stage::new(0).level(), 1);
}

fn parse(name: &str) -> Option<CompressionAlgorithm> {
    name.parse().ok()
}

#[test]
fn test_algorithm_parsing() {
    assert_eq!(parse("compress"), Some(CompressionAlgorithm::Lzw));
    assert_eq!(parse("LZW"), Some(CompressionAlgorithm::Lzw));
    assert_eq!(parse("gz"), Some(CompressionAlgorithm::Gzip));
    assert_eq!(parse(" zstd "), Some(CompressionAlgorithm::Zstd));
    assert_eq!(parse("bz2"), Some(CompressionAlgorithm::Bzip2));
    assert!("brotli".parse::<CompressionAlgorithm>().is_err());
}

#[test]
fn test_algorithm_builds_matching_stage() {
    for &algorithm in CompressionAlgorithm::all() {
        let stage = algorithm.into_stage(None);
        assert_eq!(stage.name(), algorithm.name());
        let data = sample();
        let sent = stage.forward(&data).expect("forward");
        assert_eq!(stage.inverse(&sent).expect("inverse"), data);
    }
    assert!(!CompressionAlgorithm::Lzw.has_levels());
    assert_eq!(CompressionAlgorithm::default(), CompressionAlgorithm::Lzw);
}

#[test]
fn test_default_stages_match_constructed_ones() {
    let data = sample();
    let sealed = LzwStage::default().forward(&data).expect("compress");
    assert_eq!(LzwStage::new().forward(&data).expect("compress"), sealed);
    assert_eq!(LzwStage::new().inverse(&sealed).expect("decompress"), data);
    assert_eq!(GzipStage::default().level(), GzipStage::new(6).level());
}
