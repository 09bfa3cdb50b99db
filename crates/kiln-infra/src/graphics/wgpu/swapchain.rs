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

use super::adapters::WgpuAdapterSelector;
use super::context::{instance_flags, WgpuDeviceContext, WgpuSurface};
use super::conversions::{graphics_api_from_backend, swapchain_format_from_wgpu};
use super::frame_target::WgpuFrameTarget;
use kiln_core::platform::KilnWindow;
use kiln_core::renderer::{
    AdapterInfo, Backbuffer, DeviceCreationParameters, FrameAcquire, GraphicsApi,
    InstanceParameters, RenderError, SwapchainBackend, SwapchainFormat,
};
use std::any::Any;
use std::sync::Arc;

/// Drives a `wgpu` device and window surface on behalf of the device manager.
pub struct WgpuSwapchainBackend {
    instance: Option<wgpu::Instance>,
    instance_params: InstanceParameters,
    context: Option<WgpuDeviceContext>,
    surface: Option<WgpuSurface>,
    frame_target: Arc<WgpuFrameTarget>,
    current_frame: Option<wgpu::SurfaceTexture>,
    requested_format: SwapchainFormat,
    buffer_count: u32,
    sample_count: u32,
    acquired_frames: u64,
    current_index: u32,
}

impl WgpuSwapchainBackend {
    /// Creates a backend with nothing initialized yet.
    pub fn new() -> Self {
        Self {
            instance: None,
            instance_params: InstanceParameters::default(),
            context: None,
            surface: None,
            frame_target: Arc::new(WgpuFrameTarget::new()),
            current_frame: None,
            requested_format: SwapchainFormat::default(),
            buffer_count: 0,
            sample_count: 1,
            acquired_frames: 0,
            current_index: 0,
        }
    }

    /// The target render passes draw into. Stays valid across device re-creation.
    pub fn frame_target(&self) -> Arc<WgpuFrameTarget> {
        self.frame_target.clone()
    }

    fn instance(&self) -> Result<&wgpu::Instance, RenderError> {
        self.instance.as_ref().ok_or(RenderError::NotInitialized)
    }

    fn context(&self) -> Result<&WgpuDeviceContext, RenderError> {
        self.context.as_ref().ok_or(RenderError::NotInitialized)
    }

    fn surface_format(&self) -> SwapchainFormat {
        self.surface
            .as_ref()
            .and_then(|s| swapchain_format_from_wgpu(s.config.format))
            .unwrap_or(self.requested_format)
    }

    fn publish_frame(&mut self, frame: wgpu::SurfaceTexture, format: wgpu::TextureFormat) {
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.frame_target.set_view(view, format);
        self.current_frame = Some(frame);
        self.current_index = (self.acquired_frames % u64::from(self.buffer_count.max(1))) as u32;
        self.acquired_frames += 1;
    }
}

impl Default for WgpuSwapchainBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapchainBackend for WgpuSwapchainBackend {
    fn graphics_api(&self) -> GraphicsApi {
        self.context
            .as_ref()
            .map(|c| graphics_api_from_backend(c.adapter_backend))
            .unwrap_or_default()
    }

    fn renderer_name(&self) -> &str {
        self.context
            .as_ref()
            .map(|c| c.adapter_name.as_str())
            .unwrap_or("")
    }

    fn create_instance(&mut self, params: &InstanceParameters) -> Result<(), RenderError> {
        let descriptor = wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: instance_flags(params),
            ..Default::default()
        };
        log::info!("Creating wgpu instance with flags {:?}", descriptor.flags);
        self.instance = Some(wgpu::Instance::new(&descriptor));
        self.instance_params = params.clone();
        Ok(())
    }

    fn enumerate_adapters(&self) -> Result<Vec<AdapterInfo>, RenderError> {
        let instance = self.instance()?;
        Ok(WgpuAdapterSelector::new(instance.clone()).list_adapters())
    }

    fn create_device(&mut self, params: &DeviceCreationParameters) -> Result<(), RenderError> {
        let instance = self.instance()?.clone();
        if params.enable_validation_layer
            && !self.instance_params.enable_debug_runtime
            && !self.instance_params.enable_gpu_validation
        {
            log::warn!("Validation was requested after instance creation; it stays off.");
        }

        let adapter = WgpuAdapterSelector::new(instance).select(params.requested_adapter())?;
        let context = pollster::block_on(WgpuDeviceContext::new(adapter, params))?;
        self.frame_target
            .bind_device(context.device.clone(), context.queue.clone());
        self.context = Some(context);
        self.requested_format = params.swapchain_format;
        self.sample_count = params.swapchain_sample_count.max(1);
        Ok(())
    }

    fn create_swapchain(
        &mut self,
        window: &dyn KilnWindow,
        params: &DeviceCreationParameters,
    ) -> Result<(), RenderError> {
        let instance = self.instance()?;
        let context = self.context()?;
        let surface = WgpuSurface::new(
            instance,
            context,
            window.clone_handle_arc(),
            window.inner_size(),
            params,
        )?;
        self.surface = Some(surface);
        self.buffer_count = params.swapchain_buffer_count.max(1);
        self.sample_count = params.swapchain_sample_count.max(1);
        self.acquired_frames = 0;
        self.current_index = 0;
        log::info!(
            "Swapchain created with {} backbuffers on \"{}\"",
            self.buffer_count,
            self.renderer_name()
        );
        Ok(())
    }

    fn destroy_device_and_swapchain(&mut self) {
        self.current_frame = None;
        self.frame_target.clear();
        self.surface = None;
        if let Some(context) = self.context.take() {
            log::info!("Destroying wgpu device on \"{}\"", context.adapter_name);
            if let Err(e) = context.device.poll(wgpu::PollType::Wait) {
                log::warn!("Failed to poll device during shutdown: {e:?}");
            }
        }
        self.buffer_count = 0;
    }

    fn resize_swapchain(&mut self, params: &DeviceCreationParameters) -> Result<(), RenderError> {
        let width = params.back_buffer_width;
        let height = params.back_buffer_height;
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        let surface = self.surface.as_mut().ok_or(RenderError::SurfaceUnavailable)?;

        if width == 0 || height == 0 {
            log::warn!("Ignoring resize request to zero dimensions: {width}x{height}");
            return Ok(());
        }
        if surface.matches(width, height, params.vsync_enabled) {
            return Ok(());
        }

        // Textures of the old size must be gone before reconfiguring.
        self.current_frame = None;
        self.frame_target.clear_view();
        log::debug!("Resizing surface configuration to {width}x{height}");
        surface.configure(&context.device, width, height, params.vsync_enabled)
    }

    fn begin_frame(&mut self) -> FrameAcquire {
        let Some(context) = self.context.as_ref() else {
            return FrameAcquire::DeviceLost;
        };
        if context.is_lost() {
            return FrameAcquire::DeviceLost;
        }
        let Some(surface) = self.surface.as_ref().filter(|s| s.configured) else {
            return FrameAcquire::Skipped;
        };
        let format = surface.config.format;

        let acquired = match surface.surface.get_current_texture() {
            Ok(frame) => Some(frame),
            Err(e @ wgpu::SurfaceError::Lost) | Err(e @ wgpu::SurfaceError::Outdated) => {
                log::warn!("Swapchain surface lost or outdated ({e:?}). Reconfiguring.");
                surface.reconfigure(&context.device);
                surface.surface.get_current_texture().ok()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Swapchain OutOfMemory!");
                return FrameAcquire::DeviceLost;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Swapchain Timeout acquiring frame.");
                None
            }
            Err(e) => {
                log::error!("Unexpected SurfaceError: {e:?}");
                None
            }
        };

        match acquired {
            Some(frame) => {
                self.publish_frame(frame, format);
                FrameAcquire::Acquired
            }
            None => FrameAcquire::Skipped,
        }
    }

    fn present(&mut self, vsync: bool) -> Result<(), RenderError> {
        self.frame_target.clear_view();
        let frame = self.current_frame.take().ok_or_else(|| {
            RenderError::PresentFailed("No backbuffer was acquired".to_string())
        })?;
        let context = self.context()?;
        if context.is_lost() {
            return Err(RenderError::DeviceLost);
        }
        if context.has_failed() {
            return Err(RenderError::PresentFailed(
                "A validation error was raised with warnings treated as errors".to_string(),
            ));
        }
        log::trace!("Presenting backbuffer {} (vsync: {vsync})", self.current_index);
        frame.present();
        Ok(())
    }

    fn current_backbuffer_index(&self) -> u32 {
        self.current_index
    }

    fn backbuffer_count(&self) -> u32 {
        self.buffer_count
    }

    fn backbuffer(&self, index: u32) -> Option<Backbuffer> {
        let surface = self.surface.as_ref()?;
        if index >= self.buffer_count {
            return None;
        }
        Some(Backbuffer {
            index,
            width: surface.config.width,
            height: surface.config.height,
            format: self.surface_format(),
            sample_count: self.sample_count,
            native_handle: 0,
        })
    }

    fn run_garbage_collection(&mut self) {
        if let Some(context) = self.context.as_ref() {
            if let Err(e) = context.device.poll(wgpu::PollType::Poll) {
                log::warn!("Failed to poll device (non-blocking): {e:?}");
            }
        }
    }

    fn wait_for_idle(&mut self) -> bool {
        match self.context.as_ref() {
            Some(context) => match context.device.poll(wgpu::PollType::Wait) {
                Ok(_) => true,
                Err(e) => {
                    log::warn!("Failed to wait for the device to go idle: {e:?}");
                    false
                }
            },
            None => true,
        }
    }

    fn report_live_objects(&self) {
        match self.instance.as_ref().and_then(|i| i.generate_report()) {
            Some(report) => log::info!("wgpu live objects: {report:#?}"),
            None => log::info!("wgpu live object report unavailable for this backend."),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
