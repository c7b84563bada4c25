//! Error types for the benchmark runners

use thiserror::Error;

use crate::gpu::GpuError;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Failed to build CPU thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Gpu(#[from] GpuError),
}

pub type BenchResult<T> = Result<T, BenchError>;
