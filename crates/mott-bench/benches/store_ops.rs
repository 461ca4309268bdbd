//! Criterion micro-benchmarks for the diagnostic store codec.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mott_core::{EventId, PdgCode, TrackId};
use mott_record::{DiagnosticRecord, StoreHeader, StoreReader, StoreWriter};

fn record(event: u64) -> DiagnosticRecord {
    DiagnosticRecord {
        event: EventId(event),
        track: TrackId::PRIMARY,
        parent: TrackId::NONE,
        pre_position_x: 0.25,
        pre_momentum_x: -1.5,
        post_position_y: 3.0,
        post_momentum_z: 850.0,
        pre_total_energy: 855.0,
        pdg: PdgCode::ELECTRON,
        material: "detectorMat".to_string(),
    }
}

fn header() -> StoreHeader {
    StoreHeader {
        seed: 42,
        watched: vec!["detectorMat".to_string(), "radiatorMat".to_string()],
    }
}

/// Benchmark: buffer and flush 10K rows.
fn bench_write_10k_rows(c: &mut Criterion) {
    c.bench_function("store_write_10k_rows", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(1 << 20);
            let mut writer = StoreWriter::create(&mut buf, &header()).unwrap();
            for i in 0..10_000u64 {
                writer.append(record(i)).unwrap();
            }
            writer.flush().unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: read back 10K rows.
fn bench_read_10k_rows(c: &mut Criterion) {
    let mut buf = Vec::with_capacity(1 << 20);
    {
        let mut writer = StoreWriter::create(&mut buf, &header()).unwrap();
        for i in 0..10_000u64 {
            writer.append(record(i)).unwrap();
        }
        writer.flush().unwrap();
    }

    c.bench_function("store_read_10k_rows", |b| {
        b.iter(|| {
            let rows = StoreReader::open(buf.as_slice()).unwrap().records().unwrap();
            black_box(rows.len());
        });
    });
}

criterion_group!(benches, bench_write_10k_rows, bench_read_10k_rows);
criterion_main!(benches);
