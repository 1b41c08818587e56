//! Gallery benchmarks.
//!
//! Benchmarks:
//! - Directory listing with many snapshots (every request re-reads it)
//! - Data URI decoding of upload payloads
//!
//! Run with:
//! ```bash
//! cargo bench --bench gallery_bench
//! ```

use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use arsnap::payload::{decode_png_data_uri, encode_png_data_uri};
use arsnap::store::{FilesystemStore, ManualClock, SnapshotStore};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn listing_benchmarks(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("gallery_list");
    group.measurement_time(Duration::from_secs(5));

    for count in [10usize, 100, 1000] {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let store = FilesystemStore::with_clock(dir.path(), clock.clone()).unwrap();
        rt.block_on(async {
            for _ in 0..count {
                store.create(b"\x89PNG\r\n\x1a\n").await.unwrap();
                clock.advance(1);
            }
        });

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(rt.block_on(store.list()).unwrap()));
        });
    }

    group.finish();
}

fn payload_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_decode");

    for size_kb in [16usize, 256, 4096] {
        let uri = encode_png_data_uri(&vec![0x5a; size_kb * 1024]);
        group.throughput(Throughput::Bytes(uri.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_kb), &uri, |b, uri| {
            b.iter(|| black_box(decode_png_data_uri(Some(uri)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, listing_benchmarks, payload_benchmarks);
criterion_main!(benches);
