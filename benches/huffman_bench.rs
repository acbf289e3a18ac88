// In benches/huffman_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use huffpak::{compress_bytes, decompress_bytes, HuffpakConfig};

// --- Mock Data Generation ---

/// Generates a vector of highly compressible data.
fn generate_low_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let pattern = b"abcdefgABCDEFG12345";
    while data.len() < size {
        data.extend_from_slice(pattern);
    }
    data.truncate(size);
    data
}

/// Generates a vector of less compressible, more random-looking data.
fn generate_high_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let pattern: Vec<u8> = (0..=255u8).collect();
    while data.len() < size {
        data.extend_from_slice(&pattern);
    }
    data.truncate(size);
    data
}

// --- Benchmark Suite ---

const BENCH_DATA_SIZE: usize = 65536; // 64 KB

fn bench_huffman_pipeline(c: &mut Criterion) {
    // --- Setup Data ---
    let low_entropy_data = generate_low_entropy_bytes(BENCH_DATA_SIZE);
    let high_entropy_data = generate_high_entropy_bytes(BENCH_DATA_SIZE);

    let byte_config = HuffpakConfig::default();
    let digram_config = HuffpakConfig {
        order: 2,
        ..Default::default()
    };

    // Prepare containers once so the decode benchmarks measure decoding only.
    let container_low = compress_bytes(&low_entropy_data, &byte_config).unwrap();
    let container_high = compress_bytes(&high_entropy_data, &byte_config).unwrap();
    let container_low_digram = compress_bytes(&low_entropy_data, &digram_config).unwrap();

    let mut group = c.benchmark_group("Huffman Pipeline");
    group.throughput(criterion::Throughput::Bytes(BENCH_DATA_SIZE as u64));

    // --- Encoding Benchmarks ---
    group.bench_function("Compress order=1 (Low Entropy)", |b| {
        b.iter(|| black_box(compress_bytes(black_box(&low_entropy_data), &byte_config)))
    });
    group.bench_function("Compress order=1 (High Entropy)", |b| {
        b.iter(|| black_box(compress_bytes(black_box(&high_entropy_data), &byte_config)))
    });
    group.bench_function("Compress order=2 (Low Entropy)", |b| {
        b.iter(|| black_box(compress_bytes(black_box(&low_entropy_data), &digram_config)))
    });

    // --- Decoding Benchmarks ---
    group.bench_function("Decompress order=1 (Low Entropy)", |b| {
        b.iter(|| black_box(decompress_bytes(black_box(&container_low))))
    });
    group.bench_function("Decompress order=1 (High Entropy)", |b| {
        b.iter(|| black_box(decompress_bytes(black_box(&container_high))))
    });
    group.bench_function("Decompress order=2 (Low Entropy)", |b| {
        b.iter(|| black_box(decompress_bytes(black_box(&container_low_digram))))
    });

    group.finish();
}

// These two lines generate the main function and register the benchmark group.
criterion_group!(benches, bench_huffman_pipeline);
criterion_main!(benches);
