//! Throughput benchmarks for send and receive pipelines
//!
//! Sizes span small messages to 1MB payloads, for compressible and
//! incompressible data.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use duplex::prelude::*;
use duplex::{CipherAlgorithm, CompressionAlgorithm, DiscardSink};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn payloads(size: usize) -> [(&'static str, Vec<u8>); 2] {
    let text: Vec<u8> = b"Hello World, hello pipeline. "
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect();
    let mut random = vec![0u8; size];
    StdRng::seed_from_u64(42).fill_bytes(&mut random);
    [("text", text), ("random", random)]
}

/// Full compress + encrypt round trip at several sizes
fn benchmark_roundtrip(c: &mut Criterion) {
    let key = SecretKey::generate();
    let chain = Duplex::chain()
        .compress()
        .encrypt(&key)
        .expect("valid key")
        .build();
    let mut group = c.benchmark_group("lzw_aes_roundtrip");

    for size in [1024, 65536, 1_048_576] {
        group.throughput(Throughput::Bytes(size as u64));
        for (label, data) in payloads(size) {
            group.bench_with_input(BenchmarkId::new(label, size), &data, |b, data| {
                b.iter(|| {
                    let wire = MemorySink::new();
                    let inbox = MemorySink::new();
                    chain.send(&wire).run(data).expect("send should succeed");
                    let sent = wire.take().expect("send delivered");
                    chain.receive(&inbox).run(&sent).expect("receive should succeed");
                    std::hint::black_box(inbox.take());
                });
            });
        }
    }
    group.finish();
}

/// Send direction only, per compression algorithm
fn benchmark_compressors(c: &mut Criterion) {
    let sink = DiscardSink::new();
    let mut group = c.benchmark_group("send_by_compressor");
    let size = 65536;
    group.throughput(Throughput::Bytes(size as u64));
    let [(_, text), _] = payloads(size);

    for &algorithm in CompressionAlgorithm::all() {
        let chain = Duplex::chain().compress_with(algorithm, None).build();
        group.bench_with_input(BenchmarkId::new(algorithm.name(), size), &text, |b, data| {
            b.iter(|| chain.send(&sink).run(data).expect("send should succeed"));
        });
    }
    group.finish();
}

/// Send direction only, per cipher
fn benchmark_ciphers(c: &mut Criterion) {
    let key = SecretKey::generate();
    let sink = DiscardSink::new();
    let mut group = c.benchmark_group("send_by_cipher");
    let size = 65536;
    group.throughput(Throughput::Bytes(size as u64));
    let [_, (_, random)] = payloads(size);

    for &algorithm in CipherAlgorithm::all() {
        let chain = Duplex::chain()
            .encrypt_with(algorithm, &key, None)
            .expect("valid key")
            .build();
        group.bench_with_input(
            BenchmarkId::new(algorithm.stage_name(), size),
            &random,
            |b, data| {
                b.iter(|| chain.send(&sink).run(data).expect("send should succeed"));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_roundtrip,
    benchmark_compressors,
    benchmark_ciphers
);
criterion_main!(benches);
