//! CPU and GPU floating-point throughput benchmark
//!
//! Runs an 8-step multiply-add chain over a 1M-float buffer on every core,
//! then a 16-step FMA compute kernel over the same sized buffers on a GPU,
//! each for a fixed wall-clock duration, and reports GFLOPS for both.
//!
//! Both runners count one multiply-add as one operation, so the reported
//! figures are half of the true FLOP rate.

pub mod benchmarks;
pub mod config;
pub mod constants;
pub mod error;
pub mod gpu;

pub use benchmarks::{run_cpu, run_gpu, BenchmarkReport, CpuRunner, GpuRunner};
pub use config::BenchConfig;
pub use error::{BenchError, BenchResult};
pub use gpu::{GpuContext, GpuError};
