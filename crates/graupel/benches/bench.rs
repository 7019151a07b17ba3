use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use graupel::{Generator, GraupelId, TimeSource};
use std::time::Instant;

struct FixedMockTime {
    millis: i64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration. A pinned clock offers
// exactly one millisecond of sequence space, so this must not exceed 4096.
const TOTAL_IDS: usize = 4096;

/// Benchmarks the hot path: a pinned clock keeps every call in the same
/// millisecond, exercising only the sequence increment and the pack.
fn bench_pinned_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/pinned_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = Generator::with_time_source(
                    0,
                    FixedMockTime {
                        millis: GraupelId::EPOCH_MS + 1,
                    },
                )
                .expect("worker id in range");
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().expect("pinned clock cannot regress"));
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks realistic wall-clock behavior, including the occasional wait
/// for the next millisecond under sequence exhaustion.
fn bench_system_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/system_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator = Generator::new(0).expect("worker id in range");
            let start = Instant::now();

            for _ in 0..iters {
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().expect("system clock regressed"));
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pinned_clock, bench_system_clock);
criterion_main!(benches);
