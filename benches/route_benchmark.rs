//! Performance benchmarks for the per-batch hot path
//!
//! Measures batch decoding, routing decisions and snippet extraction.
//! Run with: cargo bench

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cluster_notify::adapters::mock::{RecordingSink, StaticFetcher};
use cluster_notify::models::ChangeEvent;
use cluster_notify::policy::WatchPolicy;
use cluster_notify::router::{tail_lines, EventRouter};
use cluster_notify::sse::decode_batch;

/// Generate a batch mixing watched and unwatched events
fn generate_batch(events: usize) -> Vec<ChangeEvent> {
    (0..events)
        .map(|i| match i % 4 {
            0 => ChangeEvent::new(
                "child_file_added",
                format!("proj/out/run-{}/report.csv", i),
                vec!["1".to_string(), format!("{}", i)],
            ),
            1 => ChangeEvent::new(
                "child_data_written",
                format!("proj/in/data-{}.bin", i),
                vec![format!("{}", i)],
            ),
            2 => ChangeEvent::new("child_dir_added", format!("proj/out/run-{}", i), vec![]),
            _ => ChangeEvent::new("child_file_removed", format!("tmp/{}.log", i), vec![]),
        })
        .collect()
}

fn router() -> EventRouter {
    let policy = WatchPolicy::new(
        ["child_file_added", "child_data_written", "child_dir_added"],
        [".csv", ".log"],
        ["/proj/out", "/scratch"],
    )
    .expect("valid policy");
    EventRouter::new(
        Arc::new(policy),
        Arc::new(StaticFetcher::new()),
        Arc::new(RecordingSink::new()),
    )
}

/// Benchmark decoding a JSON batch payload
fn bench_decode_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_batch");

    for size in [1, 10, 100, 1000].iter() {
        let payload = serde_json::to_string(&generate_batch(*size)).expect("batch serializes");
        group.throughput(Throughput::Bytes(payload.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_events", size)),
            &payload,
            |b, payload| {
                b.iter(|| {
                    let batch = decode_batch(black_box(payload));
                    black_box(batch)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark routing decisions over a decoded batch
fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");
    let router = router();

    for size in [10, 100, 1000].iter() {
        let batch = generate_batch(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_events", size)),
            &batch,
            |b, batch| {
                b.iter(|| {
                    for event in batch {
                        black_box(router.decide(black_box(event)));
                    }
                });
            },
        );
    }

    group.finish();
}

/// Benchmark snippet extraction from a full fetch window
fn bench_tail_lines(c: &mut Criterion) {
    let text: String = (0..2_000)
        .map(|i| format!("{},{},{}\n", i, i * 2, i * 3))
        .collect();
    let text = &text[..text.len().min(20_000)];

    c.bench_function("tail_lines_20kb", |b| {
        b.iter(|| black_box(tail_lines(black_box(text), 10)));
    });
}

criterion_group!(benches, bench_decode_batch, bench_decide, bench_tail_lines);
criterion_main!(benches);
