/// Timed CPU and GPU throughput runners
pub mod cpu_runner;
pub mod gpu_runner;
pub mod report;

pub use cpu_runner::CpuRunner;
pub use gpu_runner::GpuRunner;
pub use report::BenchmarkReport;

use crate::error::BenchResult;
use crate::gpu::GpuError;

/// Run the CPU phase for `duration_secs` on every core
pub fn run_cpu(duration_secs: f64) -> BenchResult<BenchmarkReport> {
    let mut runner = CpuRunner::new()?;
    Ok(runner.run(duration_secs))
}

/// Run the GPU phase for `duration_secs`.
///
/// Returns `Ok(None)` after printing one diagnostic line to stderr when no
/// usable GPU exists. Device resources are released before this returns.
pub fn run_gpu(duration_secs: f64) -> Result<Option<BenchmarkReport>, GpuError> {
    let runner = match GpuRunner::new() {
        Ok(runner) => runner,
        Err(e) if e.is_unavailable() => {
            log::debug!("[run_gpu] Skipping GPU phase: {}", e);
            eprintln!("{}", e);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    Ok(Some(runner.run(duration_secs)))
}
