//! Fixed workload parameters shared by both runners

/// Number of `f32` elements in every buffer (1M)
pub const ELEMENT_COUNT: usize = 1 << 20;

/// Multiply-add steps applied per element on the CPU
pub const CPU_OPS_PER_ELEMENT: u64 = 8;

/// Fused multiply-adds applied per element by the GPU kernel
pub const GPU_OPS_PER_ELEMENT: u64 = 16;

/// Work-items per work-group. Must match `@workgroup_size` in the kernel.
pub const WORKGROUP_SIZE: u32 = 256;

/// Number of work-groups per dispatch
pub const WORKGROUP_COUNT: u32 = 1024;

/// Total launched work-items; the kernel grid-strides when this is below `ELEMENT_COUNT`
pub const GLOBAL_WORK_SIZE: u32 = WORKGROUP_SIZE * WORKGROUP_COUNT;

/// Value every input element is initialized to
pub const INPUT_VALUE: f32 = 1.0;

/// Benchmark duration used when none is given
pub const DEFAULT_DURATION_SECS: f64 = 1.0;

pub const CPU_LABEL: &str = "CPU MAX";
pub const GPU_LABEL: &str = "GPU MAX";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_size_matches_dispatch() {
        assert_eq!(GLOBAL_WORK_SIZE, 256 * 1024);
        assert!((GLOBAL_WORK_SIZE as usize) < ELEMENT_COUNT);
    }
}
