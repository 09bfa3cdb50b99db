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

use super::adapters::backend_name;
use super::conversions::{choose_present_mode, choose_surface_format};
use kiln_core::platform::KilnWindowHandle;
use kiln_core::renderer::{DeviceCreationParameters, InstanceParameters, RenderError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wgpu::{Adapter, Instance, SurfaceTargetUnsafe};

/// Builds the instance flags for the requested debug settings.
pub(crate) fn instance_flags(params: &InstanceParameters) -> wgpu::InstanceFlags {
    let mut flags = wgpu::InstanceFlags::empty();
    if params.enable_debug_runtime {
        flags |= wgpu::InstanceFlags::DEBUG | wgpu::InstanceFlags::VALIDATION;
    }
    if params.enable_gpu_validation {
        flags |= wgpu::InstanceFlags::VALIDATION | wgpu::InstanceFlags::GPU_BASED_VALIDATION;
    }
    flags
}

/// The logical device created on a selected adapter.
#[derive(Debug)]
pub(crate) struct WgpuDeviceContext {
    pub adapter: Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_name: String,
    pub adapter_backend: wgpu::Backend,
    /// Set by the device-lost callback.
    pub lost: Arc<AtomicBool>,
    /// Set by the error handler when warnings are promoted to errors.
    pub failed: Arc<AtomicBool>,
}

impl WgpuDeviceContext {
    /// Creates the logical device and queue on `adapter`.
    pub async fn new(
        adapter: Adapter,
        params: &DeviceCreationParameters,
    ) -> Result<Self, RenderError> {
        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {})",
            adapter_info.name,
            backend_name(adapter_info.backend)
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Kiln Logical Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| RenderError::DeviceCreationFailed(e.to_string()))?;
        log::info!("Logical device and command queue created.");

        let failed = Arc::new(AtomicBool::new(false));
        let failed_flag = failed.clone();
        let warnings_as_errors = params.instance.enable_warnings_as_errors;
        device.on_uncaptured_error(Box::new(move |e| {
            log::error!("WGPU Uncaptured Error: {e}");
            if warnings_as_errors {
                failed_flag.store(true, Ordering::Release);
            }
        }));

        let lost = Arc::new(AtomicBool::new(false));
        let lost_flag = lost.clone();
        device.set_device_lost_callback(move |reason, message| {
            log::error!("WGPU device lost ({reason:?}): {message}");
            lost_flag.store(true, Ordering::Release);
        });

        if params.enable_compute_queue || params.enable_copy_queue {
            log::debug!("wgpu exposes a single queue; compute and copy work share it.");
        }

        Ok(Self {
            adapter,
            device,
            queue,
            adapter_name: adapter_info.name,
            adapter_backend: adapter_info.backend,
            lost,
            failed,
        })
    }

    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Acquire)
    }

    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }
}

/// A window surface and its current configuration.
pub(crate) struct WgpuSurface {
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    /// `false` until a non-zero size has been configured.
    pub configured: bool,
    supported_present_modes: Vec<wgpu::PresentMode>,
    // The surface borrows the native window; keep it alive.
    _window: KilnWindowHandle,
}

impl WgpuSurface {
    /// Creates a surface for `window` and picks its format and present mode.
    ///
    /// The surface is not configured yet: the first resize does that.
    pub fn new(
        instance: &Instance,
        context: &WgpuDeviceContext,
        window: KilnWindowHandle,
        size: (u32, u32),
        params: &DeviceCreationParameters,
    ) -> Result<Self, RenderError> {
        let surface_target = unsafe {
            SurfaceTargetUnsafe::from_window(&window).map_err(|e| {
                RenderError::SwapchainCreationFailed(format!(
                    "Failed to create surface target: {e}"
                ))
            })?
        };
        let surface = unsafe { instance.create_surface_unsafe(surface_target) }
            .map_err(|e| RenderError::SwapchainCreationFailed(e.to_string()))?;
        log::debug!("WGPU surface created for the window.");

        if !context.adapter.is_surface_supported(&surface) {
            return Err(RenderError::SwapchainCreationFailed(format!(
                "Adapter \"{}\" cannot present to this window",
                context.adapter_name
            )));
        }

        let caps = surface.get_capabilities(&context.adapter);
        let format = choose_surface_format(params.swapchain_format, &caps.formats).ok_or_else(
            || RenderError::SwapchainCreationFailed("Surface reports no formats".to_string()),
        )?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0,
            height: size.1,
            present_mode: choose_present_mode(params.vsync_enabled, &caps.present_modes),
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: params.max_frames_in_flight.max(1),
        };
        log::info!(
            "Surface format {:?}, present mode {:?}",
            config.format,
            config.present_mode
        );

        Ok(Self {
            surface,
            config,
            configured: false,
            supported_present_modes: caps.present_modes,
            _window: window,
        })
    }

    /// Returns `true` if the surface is configured with this size and vsync.
    pub fn matches(&self, width: u32, height: u32, vsync: bool) -> bool {
        self.configured
            && self.config.width == width
            && self.config.height == height
            && self.config.present_mode == choose_present_mode(vsync, &self.supported_present_modes)
    }

    /// Reconfigures the surface, catching validation errors.
    pub fn configure(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(), RenderError> {
        self.config.width = width;
        self.config.height = height;
        self.config.present_mode = choose_present_mode(vsync, &self.supported_present_modes);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        self.surface.configure(device, &self.config);
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            self.configured = false;
            return Err(RenderError::SwapchainResizeFailed(error.to_string()));
        }
        self.configured = true;
        Ok(())
    }

    /// Reapplies the current configuration after the surface was lost.
    pub fn reconfigure(&self, device: &wgpu::Device) {
        self.surface.configure(device, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_flags() {
        assert_eq!(
            instance_flags(&InstanceParameters::default()),
            wgpu::InstanceFlags::empty()
        );

        let debug = instance_flags(&InstanceParameters {
            enable_debug_runtime: true,
            ..Default::default()
        });
        assert!(debug.contains(wgpu::InstanceFlags::DEBUG));
        assert!(debug.contains(wgpu::InstanceFlags::VALIDATION));

        let gpu = instance_flags(&InstanceParameters {
            enable_gpu_validation: true,
            ..Default::default()
        });
        assert!(!gpu.contains(wgpu::InstanceFlags::DEBUG));
        assert!(gpu.contains(wgpu::InstanceFlags::GPU_BASED_VALIDATION));
    }
}
