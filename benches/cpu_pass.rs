// Single-pass cost of the CPU multiply-add workload at several pool sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flops_bench::CpuRunner;

fn bench_cpu_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_pass");

    let max_threads = num_cpus::get();
    let mut thread_counts = vec![1, max_threads];
    thread_counts.dedup();

    for threads in thread_counts {
        let mut runner = CpuRunner::with_threads(threads).expect("thread pool");
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, _| {
            b.iter(|| runner.run_pass());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cpu_pass);
criterion_main!(benches);
