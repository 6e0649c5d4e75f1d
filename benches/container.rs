//! Criterion benchmarks for frame container serialization and the RAW
//! compression mode it typically wraps.
//!
//! Run with:
//!   cargo bench --bench container

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gitflix::codec::raw::{decode_raw, encode_raw};
use gitflix::container::{CompressionType, FrameRecord};

fn synthetic_frame(byte_len: usize) -> Vec<u8> {
    (0..byte_len).map(|i| (i % 251) as u8).collect()
}

fn bench_container_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_round_trip");

    for &(w, h) in &[(640u32, 360u32), (1920, 1080)] {
        let byte_len = (w * h * 3) as usize;
        let pixels = synthetic_frame(byte_len);
        let payload = encode_raw(&pixels);
        let record =
            FrameRecord { frame_number: 0, width: w, height: h, channels: 3, compression_type: CompressionType::Raw, payload };

        group.throughput(Throughput::Bytes(byte_len as u64));
        group.bench_with_input(BenchmarkId::new("serialize", format!("{w}x{h}")), &record, |b, record| {
            b.iter(|| record.serialize())
        });

        let bytes = record.serialize();
        group.bench_with_input(BenchmarkId::new("deserialize", format!("{w}x{h}")), &bytes, |b, bytes| {
            b.iter(|| FrameRecord::deserialize(bytes, (w, h, 3)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("decode_raw", format!("{w}x{h}")), &record.payload, |b, payload| {
            b.iter(|| decode_raw(payload, w, h, 3, 0).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_container_round_trip);
criterion_main!(benches);
