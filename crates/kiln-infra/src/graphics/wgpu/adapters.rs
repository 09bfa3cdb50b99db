// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Adapter enumeration and selection.
//!
//! Adapters are listed in the order `wgpu` reports them across all enabled
//! backends. That order is the one `DeviceCreationParameters::adapter_index`
//! refers to.

use kiln_core::renderer::{AdapterInfo, RenderError};
use wgpu::{Adapter, Backend, Backends, Instance, PowerPreference, RequestAdapterOptions};

/// Returns a human-readable name for a backend.
pub fn backend_name(backend: Backend) -> &'static str {
    match backend {
        Backend::Vulkan => "Vulkan",
        Backend::Metal => "Metal",
        Backend::Dx12 => "DirectX 12",
        Backend::Gl => "OpenGL",
        Backend::BrowserWebGpu => "WebGPU",
        Backend::Noop => "No-op",
        #[allow(unreachable_patterns)]
        _ => "Unknown",
    }
}

/// Describes a `wgpu` adapter with the engine's [`AdapterInfo`].
///
/// `wgpu` does not report video memory or LUID/UUID, so those stay empty.
pub fn adapter_info(adapter: &Adapter) -> AdapterInfo {
    let info = adapter.get_info();
    AdapterInfo {
        name: info.name,
        vendor_id: info.vendor,
        device_id: info.device,
        dedicated_video_memory: 0,
        uuid: None,
        luid: None,
    }
}

/// Lists and picks adapters from a shared `wgpu::Instance`.
pub struct WgpuAdapterSelector {
    instance: Instance,
}

impl WgpuAdapterSelector {
    /// Create a new selector with a shared instance.
    pub fn new(instance: Instance) -> Self {
        Self { instance }
    }

    /// Every adapter of every enabled backend, in index order.
    pub fn adapters(&self) -> Vec<Adapter> {
        self.instance.enumerate_adapters(Backends::all())
    }

    /// Describes every adapter, in index order.
    pub fn list_adapters(&self) -> Vec<AdapterInfo> {
        self.adapters().iter().map(adapter_info).collect()
    }

    /// Picks the adapter at `index`, or lets `wgpu` pick a high performance
    /// adapter when `index` is `None`.
    pub fn select(&self, index: Option<usize>) -> Result<Adapter, RenderError> {
        match index {
            Some(index) => {
                let mut adapters = self.adapters();
                let available = adapters.len();
                if index >= available {
                    return Err(RenderError::AdapterNotFound { index, available });
                }
                Ok(adapters.swap_remove(index))
            }
            None => pollster::block_on(self.instance.request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: None,
            }))
            .map_err(|e| RenderError::DeviceCreationFailed(format!("No suitable adapter: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name_function() {
        assert_eq!(backend_name(Backend::Vulkan), "Vulkan");
        assert_eq!(backend_name(Backend::Metal), "Metal");
        assert_eq!(backend_name(Backend::Dx12), "DirectX 12");
        assert_eq!(backend_name(Backend::Gl), "OpenGL");
        assert_eq!(backend_name(Backend::BrowserWebGpu), "WebGPU");
    }

    #[test]
    fn test_select_out_of_range_reports_available_count() {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: Backends::empty(),
            ..Default::default()
        });
        let selector = WgpuAdapterSelector::new(instance);

        match selector.select(Some(7)) {
            Err(RenderError::AdapterNotFound { index, available }) => {
                assert_eq!(index, 7);
                assert_eq!(available, 0);
            }
            other => panic!("Expected AdapterNotFound, got {:?}", other.map(|_| ())),
        }
    }
}
