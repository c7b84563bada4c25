//! GPU throughput runner
//!
//! Uploads two 1M-float input buffers once, then dispatches the FMA kernel
//! over a fixed 256 x 1024 grid until the target duration has elapsed. The
//! host waits for every submission before reading the clock, so dispatches
//! never overlap. Setup time is excluded from the measurement.

use std::time::Instant;

use wgpu::util::DeviceExt;

use crate::benchmarks::BenchmarkReport;
use crate::constants::{
    ELEMENT_COUNT, GPU_LABEL, GPU_OPS_PER_ELEMENT, INPUT_VALUE, WORKGROUP_COUNT,
};
use crate::gpu::{FmaKernel, GpuContext, GpuError, KernelParams};

const BUFFER_SIZE: wgpu::BufferAddress =
    (ELEMENT_COUNT * std::mem::size_of::<f32>()) as wgpu::BufferAddress;

/// Everything the dispatch loop needs.
///
/// Fields drop top to bottom, which releases resources in reverse order of
/// acquisition: bind group, kernel, buffers, then queue and device.
pub struct GpuRunner {
    bind_group: wgpu::BindGroup,
    kernel: FmaKernel,
    _params: wgpu::Buffer,
    output: wgpu::Buffer,
    _input_b: wgpu::Buffer,
    _input_a: wgpu::Buffer,
    context: GpuContext,
}

impl GpuRunner {
    /// Discover a GPU and prepare buffers and kernel on it
    pub fn new() -> Result<Self, GpuError> {
        Ok(Self::with_context(GpuContext::discover()?))
    }

    pub fn with_context(context: GpuContext) -> Self {
        let device = &context.device;

        let input_a = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("FMA Input A"),
            size: BUFFER_SIZE,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let input_b = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("FMA Input B"),
            size: BUFFER_SIZE,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let output = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("FMA Output"),
            size: BUFFER_SIZE,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let params = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("FMA Params"),
            contents: bytemuck::bytes_of(&KernelParams::new(ELEMENT_COUNT as u32)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        // Upload inputs and wait for the transfer to land
        let ones = vec![INPUT_VALUE; ELEMENT_COUNT];
        context.queue.write_buffer(&input_a, 0, bytemuck::cast_slice(&ones));
        context.queue.write_buffer(&input_b, 0, bytemuck::cast_slice(&ones));
        let upload = context.queue.submit(std::iter::empty());
        device.poll(wgpu::Maintain::WaitForSubmissionIndex(upload));
        log::debug!("[GpuRunner] Uploaded {} bytes per input", BUFFER_SIZE);

        let kernel = FmaKernel::build(device);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("FMA Kernel Bind Group"),
            layout: &kernel.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: input_a.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: input_b.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: output.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: params.as_entire_binding(),
                },
            ],
        });

        Self {
            bind_group,
            kernel,
            _params: params,
            output,
            _input_b: input_b,
            _input_a: input_a,
            context,
        }
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.context.adapter_info
    }

    /// Submit one dispatch of the kernel and block until it completes
    pub fn dispatch(&self) {
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("FMA Dispatch"),
            });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("FMA Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.kernel.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.dispatch_workgroups(WORKGROUP_COUNT, 1, 1);
        }

        let index = self.context.queue.submit(std::iter::once(encoder.finish()));
        self.context
            .device
            .poll(wgpu::Maintain::WaitForSubmissionIndex(index));
    }

    /// Dispatch until `duration_secs` has elapsed since the first dispatch.
    /// At least one dispatch always completes.
    pub fn run(&self, duration_secs: f64) -> BenchmarkReport {
        let mut operations: u64 = 0;
        let mut iterations: u64 = 0;
        let start = Instant::now();

        loop {
            self.dispatch();
            operations += ELEMENT_COUNT as u64 * GPU_OPS_PER_ELEMENT;
            iterations += 1;

            let elapsed = start.elapsed();
            log::trace!("[GpuRunner] dispatch {} done at {:?}", iterations, elapsed);

            if elapsed.as_secs_f64() >= duration_secs {
                let report = BenchmarkReport::new(GPU_LABEL, iterations, operations, elapsed);
                log::debug!(
                    "[GpuRunner] {} dispatches in {:.3}s ({:.2} GFLOPS)",
                    iterations,
                    elapsed.as_secs_f64(),
                    report.gflops()
                );
                return report;
            }
        }
    }

    /// Run exactly `dispatches` dispatches with no time limit
    pub fn run_iterations(&self, dispatches: u64) -> BenchmarkReport {
        let start = Instant::now();
        for _ in 0..dispatches {
            self.dispatch();
        }
        BenchmarkReport::new(
            GPU_LABEL,
            dispatches,
            dispatches * ELEMENT_COUNT as u64 * GPU_OPS_PER_ELEMENT,
            start.elapsed(),
        )
    }

    /// Copy the output buffer back to the host
    pub fn read_output(&self) -> Result<Vec<f32>, GpuError> {
        let device = &self.context.device;

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("FMA Output Staging"),
            size: BUFFER_SIZE,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("FMA Readback"),
        });
        encoder.copy_buffer_to_buffer(&self.output, 0, &staging, 0, BUFFER_SIZE);
        self.context.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device.poll(wgpu::Maintain::Wait);
        pollster::block_on(rx).map_err(|_| GpuError::ReadbackChannel)??;

        let values = {
            let mapped = slice.get_mapped_range();
            bytemuck::cast_slice::<u8, f32>(&mapped).to_vec()
        };
        staging.unmap();

        Ok(values)
    }
}

impl Drop for GpuRunner {
    fn drop(&mut self) {
        log::debug!(
            "[GpuRunner] Releasing resources on {}",
            self.context.adapter_info.name
        );
    }
}
