use std::fmt;
use std::time::Duration;

/// Outcome of one timed benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub label: &'static str,
    /// Completed passes (CPU) or dispatches (GPU)
    pub iterations: u64,
    /// Accumulated operation count
    pub operations: u64,
    pub elapsed: Duration,
}

impl BenchmarkReport {
    pub fn new(label: &'static str, iterations: u64, operations: u64, elapsed: Duration) -> Self {
        Self {
            label,
            iterations,
            operations,
            elapsed,
        }
    }

    /// Billions of operations per second over the measured interval
    pub fn gflops(&self) -> f64 {
        (self.operations as f64 / self.elapsed.as_secs_f64()) / 1e9
    }

    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{} GFLOPS", self.label, self.gflops())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gflops_from_counter_and_elapsed() {
        let report = BenchmarkReport::new("CPU MAX", 4, 8_000_000_000, Duration::from_secs(2));
        assert!((report.gflops() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_is_two_lines() {
        let report = BenchmarkReport::new("GPU MAX", 1, 3_000_000_000, Duration::from_secs(1));
        assert_eq!(report.to_string(), "GPU MAX\n3 GFLOPS");
    }
}
