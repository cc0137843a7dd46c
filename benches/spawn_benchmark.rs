/*!
 * Spawn Benchmarks
 *
 * Measures spawn+reap round-trips and the cost of liveness polling.
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proc_engine::{spawn, SpawnConfig, StdioConfig};

/// Benchmark: full spawn → wait round-trip for a trivial child
fn bench_spawn_wait(c: &mut Criterion) {
    c.bench_function("process/spawn_wait", |b| {
        b.iter(|| {
            let handle = spawn(SpawnConfig::new("true")).unwrap();
            black_box(handle.wait().unwrap())
        })
    });
}

/// Benchmark: non-blocking liveness poll against a long-lived child
fn bench_liveness_poll(c: &mut Criterion) {
    let handle = spawn(SpawnConfig::new("sleep").with_args(vec!["600".to_string()])).unwrap();

    c.bench_function("process/is_alive", |b| b.iter(|| black_box(handle.is_alive())));

    handle.kill().unwrap();
    handle.wait().unwrap();
}

/// Benchmark: cached-status query after the reap
fn bench_cached_status(c: &mut Criterion) {
    let handle = spawn(SpawnConfig::new("true").with_stdout(StdioConfig::Null)).unwrap();
    handle.wait().unwrap();

    c.bench_function("process/cached_status", |b| {
        b.iter(|| black_box(handle.status()))
    });
}

criterion_group!(
    benches,
    bench_spawn_wait,
    bench_liveness_poll,
    bench_cached_status
);
criterion_main!(benches);
