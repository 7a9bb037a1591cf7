use candle_core::Device;
use tracing::{info, warn};

use crate::error::Result;

/// Pick the accelerator compiled in, unless `force_cpu` is set.
pub fn select_device(force_cpu: bool) -> Result<Device> {
    if force_cpu {
        info!("CPU forced by flag");
        return Ok(Device::Cpu);
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => return Ok(device),
            Err(e) => warn!("CUDA unavailable ({}), falling back to CPU", e),
        }
    }

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => return Ok(device),
            Err(e) => warn!("Metal unavailable ({}), falling back to CPU", e),
        }
    }

    if cfg!(not(any(feature = "cuda", feature = "metal"))) {
        warn!("Built without accelerator features; translating on CPU");
    }
    Ok(Device::Cpu)
}

pub fn device_label(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Cuda(_) => "cuda",
        Device::Metal(_) => "metal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_cpu_is_cpu() {
        let device = select_device(true).unwrap();
        assert_eq!(device_label(&device), "cpu");
    }
}
