//! Payload size benchmarks.
//!
//! Every slot is one 64-bit value word regardless of `T`, so this mostly
//! measures the bit-cast overhead in `Slot::publish`/`Slot::take` for
//! payloads of different widths (1, 2, 4, 8 bytes), not ring contention.
//!
//! Run: cargo bench --bench bench_slots

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use theta_queue::MpmcQueue;

const TOTAL_EVENTS: u64 = 2_000_000;

fn bench_payload<T: bytemuck::Pod + From<u8>>(events: u64) -> u64 {
    let q: MpmcQueue<T, 1024> = MpmcQueue::new();
    for i in 0..events {
        q.push(T::from((i % 251) as u8));
        black_box(q.pop());
    }
    events
}

fn benchmark_payload_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("Payload widths (2M events)");
    group.throughput(Throughput::Elements(TOTAL_EVENTS));
    group.sample_size(20);

    group.bench_function(BenchmarkId::new("width", "1B_u8"), |b| {
        b.iter(|| bench_payload::<u8>(TOTAL_EVENTS))
    });

    group.bench_function(BenchmarkId::new("width", "2B_u16"), |b| {
        b.iter(|| bench_payload::<u16>(TOTAL_EVENTS))
    });

    group.bench_function(BenchmarkId::new("width", "4B_u32"), |b| {
        b.iter(|| bench_payload::<u32>(TOTAL_EVENTS))
    });

    group.bench_function(BenchmarkId::new("width", "8B_u64"), |b| {
        b.iter(|| bench_payload::<u64>(TOTAL_EVENTS))
    });

    group.finish();
}

criterion_group!(benches, benchmark_payload_widths);
criterion_main!(benches);
