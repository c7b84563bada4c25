//! CPU throughput runner
//!
//! Applies an 8-step multiply-add chain to every element of a 1M-float buffer
//! set on a rayon pool, one pass after another, until the target duration
//! has elapsed. The index range is cut into one contiguous slice per worker
//! up front and never rebalanced.

use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::benchmarks::BenchmarkReport;
use crate::constants::{CPU_LABEL, CPU_OPS_PER_ELEMENT, ELEMENT_COUNT, INPUT_VALUE};
use crate::error::BenchResult;

/// Per-element kernel: `x = x*y + y`, eight times
#[inline(always)]
pub fn multiply_add_chain(mut x: f32, y: f32) -> f32 {
    x = x * y + y;
    x = x * y + y;
    x = x * y + y;
    x = x * y + y;
    x = x * y + y;
    x = x * y + y;
    x = x * y + y;
    x = x * y + y;
    x
}

pub struct CpuRunner {
    thread_pool: ThreadPool,
    /// Elements per worker slice
    chunk_len: usize,
    a: Vec<f32>,
    b: Vec<f32>,
    c: Vec<f32>,
}

impl CpuRunner {
    /// Runner with one worker per available core
    pub fn new() -> BenchResult<Self> {
        Self::with_threads(num_cpus::get())
    }

    pub fn with_threads(worker_threads: usize) -> BenchResult<Self> {
        let worker_threads = worker_threads.max(1);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|i| format!("cpu-flops-{}", i))
            .build()?;

        let chunk_len = ELEMENT_COUNT.div_ceil(worker_threads);
        log::info!(
            "[CpuRunner] {} worker threads, {} elements per slice",
            worker_threads,
            chunk_len
        );

        Ok(Self {
            thread_pool,
            chunk_len,
            a: vec![INPUT_VALUE; ELEMENT_COUNT],
            b: vec![INPUT_VALUE; ELEMENT_COUNT],
            c: vec![0.0; ELEMENT_COUNT],
        })
    }

    pub fn worker_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// One data-parallel pass over every element. Returns after all workers join.
    pub fn run_pass(&mut self) {
        let chunk_len = self.chunk_len;
        let (a, b, c) = (&self.a, &self.b, &mut self.c);

        self.thread_pool.install(|| {
            c.par_chunks_mut(chunk_len)
                .zip(a.par_chunks(chunk_len))
                .zip(b.par_chunks(chunk_len))
                .for_each(|((out, xs), ys)| {
                    for ((o, &x), &y) in out.iter_mut().zip(xs).zip(ys) {
                        *o = multiply_add_chain(x, y);
                    }
                });
        });
    }

    /// Run passes until `duration_secs` has elapsed. At least one pass always
    /// completes since the clock is only checked after a pass.
    pub fn run(&mut self, duration_secs: f64) -> BenchmarkReport {
        let mut operations: u64 = 0;
        let mut iterations: u64 = 0;
        let start = Instant::now();

        loop {
            self.run_pass();
            operations += ELEMENT_COUNT as u64 * CPU_OPS_PER_ELEMENT;
            iterations += 1;

            let elapsed = start.elapsed();
            log::trace!("[CpuRunner] pass {} done at {:?}", iterations, elapsed);

            if elapsed.as_secs_f64() >= duration_secs {
                let report = BenchmarkReport::new(CPU_LABEL, iterations, operations, elapsed);
                log::debug!(
                    "[CpuRunner] {} passes in {:.3}s ({:.2} GFLOPS)",
                    iterations,
                    elapsed.as_secs_f64(),
                    report.gflops()
                );
                return report;
            }
        }
    }

    /// Run exactly `passes` passes with no time limit
    pub fn run_iterations(&mut self, passes: u64) -> BenchmarkReport {
        let start = Instant::now();
        for _ in 0..passes {
            self.run_pass();
        }
        BenchmarkReport::new(
            CPU_LABEL,
            passes,
            passes * ELEMENT_COUNT as u64 * CPU_OPS_PER_ELEMENT,
            start.elapsed(),
        )
    }

    pub fn output(&self) -> &[f32] {
        &self.c
    }
}
