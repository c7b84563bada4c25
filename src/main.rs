/// FLOPS benchmark executable
/// Measures CPU throughput, then GPU throughput, for the same duration.
/// Usage: flops-bench [SECONDS]

use flops_bench::{run_cpu, run_gpu, BenchConfig};

const DEFAULT_LOG_FILTER: &str = "flops_bench=warn";

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report. wgpu backends are
    // silent by default; a missing GPU must leave a single diagnostic line.
    let env = env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let config = BenchConfig::from_args(std::env::args().skip(1));
    log::info!("Benchmarking for {}s per device", config.duration_secs);

    run_cpu(config.duration_secs)?.print();

    match run_gpu(config.duration_secs) {
        Ok(Some(report)) => report.print(),
        Ok(None) => {}
        Err(e) => log::error!("GPU benchmark failed: {}", e),
    }

    Ok(())
}
