//! FMA compute kernel: shader module, layout and pipeline

use crate::constants::WORKGROUP_SIZE;

pub const KERNEL_SOURCE: &str = include_str!("shaders/fma_kernel.wgsl");
pub const KERNEL_ENTRY_POINT: &str = "fma_kernel";

/// Uniform block carrying the element count, padded to 16 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct KernelParams {
    pub n: u32,
    pub _padding: [u32; 3],
}

impl KernelParams {
    pub fn new(n: u32) -> Self {
        Self { n, _padding: [0; 3] }
    }
}

/// Compiled kernel. Field order is release order: pipeline, then layouts, then module.
pub struct FmaKernel {
    pub pipeline: wgpu::ComputePipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    _pipeline_layout: wgpu::PipelineLayout,
    _shader: wgpu::ShaderModule,
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl FmaKernel {
    pub fn build(device: &wgpu::Device) -> Self {
        log::debug!(
            "[FmaKernel] Compiling {} ({} work-items per group)",
            KERNEL_ENTRY_POINT,
            WORKGROUP_SIZE
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("FMA Kernel Shader"),
            source: wgpu::ShaderSource::Wgsl(KERNEL_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("FMA Kernel Bind Group Layout"),
            entries: &[
                // Inputs
                storage_entry(0, true),
                storage_entry(1, true),
                // Output
                storage_entry(2, false),
                // Element count
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("FMA Kernel Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("FMA Kernel Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: KERNEL_ENTRY_POINT,
        });

        Self {
            pipeline,
            bind_group_layout,
            _pipeline_layout: pipeline_layout,
            _shader: shader,
        }
    }
}
