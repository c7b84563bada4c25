//! GPU discovery and device ownership

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("No GPU platform")]
    NoPlatform,

    #[error("GPU not found")]
    NoGpu,

    #[error("Device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("Buffer map failed: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("Buffer map callback dropped before completing")]
    ReadbackChannel,
}

impl GpuError {
    /// Discovery failures are the ones that skip the GPU phase quietly
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            GpuError::NoPlatform | GpuError::NoGpu | GpuError::DeviceRequest(_)
        )
    }
}

/// Preference of an adapter type, lower is better. `None` means not a GPU.
pub fn gpu_rank(device_type: wgpu::DeviceType) -> Option<u8> {
    match device_type {
        wgpu::DeviceType::DiscreteGpu => Some(0),
        wgpu::DeviceType::IntegratedGpu => Some(1),
        wgpu::DeviceType::VirtualGpu => Some(2),
        wgpu::DeviceType::Cpu | wgpu::DeviceType::Other => None,
    }
}

/// Index of the preferred GPU among `device_types`; ties go to the earliest
pub fn select_gpu<I>(device_types: I) -> Option<usize>
where
    I: IntoIterator<Item = wgpu::DeviceType>,
{
    device_types
        .into_iter()
        .enumerate()
        .filter_map(|(i, ty)| gpu_rank(ty).map(|rank| (rank, i)))
        .min()
        .map(|(_, i)| i)
}

/// Device and queue bound to one GPU adapter.
///
/// `queue` is declared before `device` so it is released first.
pub struct GpuContext {
    pub queue: wgpu::Queue,
    pub device: wgpu::Device,
    pub adapter_info: wgpu::AdapterInfo,
}

impl GpuContext {
    /// Enumerate adapters on every backend and open a device on the best GPU
    pub fn discover() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapters: Vec<wgpu::Adapter> = instance
            .enumerate_adapters(wgpu::Backends::all())
            .into_iter()
            .collect();

        if adapters.is_empty() {
            log::debug!("[GpuContext] No adapters on any backend");
            return Err(GpuError::NoPlatform);
        }

        for adapter in &adapters {
            let info = adapter.get_info();
            log::debug!(
                "[GpuContext] Adapter {} ({:?}, {:?})",
                info.name,
                info.backend,
                info.device_type
            );
        }

        let index = select_gpu(adapters.iter().map(|a| a.get_info().device_type))
            .ok_or(GpuError::NoGpu)?;
        let adapter = adapters.into_iter().nth(index).ok_or(GpuError::NoGpu)?;

        Self::from_adapter(adapter)
    }

    pub fn from_adapter(adapter: wgpu::Adapter) -> Result<Self, GpuError> {
        let adapter_info = adapter.get_info();
        log::info!(
            "[GpuContext] Using {} on {:?}",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("FLOPS Benchmark Device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
            },
            None,
        ))?;

        Ok(Self {
            queue,
            device,
            adapter_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::DeviceType;

    #[test]
    fn test_prefers_discrete() {
        let types = [DeviceType::IntegratedGpu, DeviceType::Cpu, DeviceType::DiscreteGpu];
        assert_eq!(select_gpu(types), Some(2));
    }

    #[test]
    fn test_first_of_equal_rank_wins() {
        let types = [DeviceType::Cpu, DeviceType::IntegratedGpu, DeviceType::IntegratedGpu];
        assert_eq!(select_gpu(types), Some(1));
    }

    #[test]
    fn test_cpu_adapters_are_not_gpus() {
        assert_eq!(select_gpu([DeviceType::Cpu, DeviceType::Other]), None);
        assert_eq!(select_gpu(std::iter::empty()), None);
    }

    #[test]
    fn test_diagnostic_messages() {
        assert_eq!(GpuError::NoPlatform.to_string(), "No GPU platform");
        assert_eq!(GpuError::NoGpu.to_string(), "GPU not found");
        assert!(GpuError::NoGpu.is_unavailable());
        assert!(!GpuError::ReadbackChannel.is_unavailable());
    }
}
