//! GPU device discovery and the FMA compute kernel
//!
//! Built on wgpu compute. Adapters are enumerated across every backend and the
//! best GPU-class adapter is opened; CPU and software adapters are skipped.

pub mod context;
pub mod kernel;

pub use context::{gpu_rank, select_gpu, GpuContext, GpuError};
pub use kernel::{FmaKernel, KernelParams, KERNEL_SOURCE};
