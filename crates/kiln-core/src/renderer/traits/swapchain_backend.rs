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

use crate::platform::window::KilnWindow;
use crate::renderer::api::{
    AdapterInfo, Backbuffer, DeviceCreationParameters, GraphicsApi, InstanceParameters,
};
use crate::renderer::error::RenderError;

/// Outcome of [`SwapchainBackend::begin_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAcquire {
    /// A backbuffer is ready for rendering.
    Acquired,
    /// A backbuffer is ready, but the swapchain changed underneath the
    /// manager (fullscreen toggle, surface recreated). The manager runs the
    /// resize protocol with the reported size before rendering.
    SwapchainChanged {
        /// Current swapchain width.
        width: u32,
        /// Current swapchain height.
        height: u32,
    },
    /// No backbuffer this tick (timeout, transient surface state). Render and
    /// present are skipped.
    Skipped,
    /// The device is gone.
    DeviceLost,
}

/// The contract a graphics API implements to be driven by the device manager.
///
/// Each creation step fails on its own without touching the layers below:
/// a failed device creation leaves the instance usable, a failed swapchain
/// creation leaves the device usable.
pub trait SwapchainBackend {
    /// The API this backend drives.
    fn graphics_api(&self) -> GraphicsApi;

    /// Name of the adapter in use, or an empty string before device creation.
    fn renderer_name(&self) -> &str;

    /// Creates the API instance. Called once per instance lifetime.
    fn create_instance(&mut self, params: &InstanceParameters) -> Result<(), RenderError>;

    /// Lists the adapters available to the instance, in index order.
    fn enumerate_adapters(&self) -> Result<Vec<AdapterInfo>, RenderError>;

    /// Creates the logical device on the adapter selected by `params.adapter_index`.
    fn create_device(&mut self, params: &DeviceCreationParameters) -> Result<(), RenderError>;

    /// Creates the swapchain for `window`.
    fn create_swapchain(
        &mut self,
        window: &dyn KilnWindow,
        params: &DeviceCreationParameters,
    ) -> Result<(), RenderError>;

    /// Releases the swapchain and the device. The instance survives.
    fn destroy_device_and_swapchain(&mut self);

    /// Resizes the swapchain to `params.back_buffer_width` x
    /// `params.back_buffer_height` with `params.vsync_enabled`.
    ///
    /// Must be a no-op when the swapchain already matches, which is the case
    /// right after `begin_frame` reported [`FrameAcquire::SwapchainChanged`].
    fn resize_swapchain(&mut self, params: &DeviceCreationParameters) -> Result<(), RenderError>;

    /// Acquires the next backbuffer.
    fn begin_frame(&mut self) -> FrameAcquire;

    /// Presents the acquired backbuffer.
    fn present(&mut self, vsync: bool) -> Result<(), RenderError>;

    /// Index of the backbuffer acquired by the last `begin_frame`.
    fn current_backbuffer_index(&self) -> u32;

    /// Number of backbuffers in the swapchain.
    fn backbuffer_count(&self) -> u32;

    /// Describes backbuffer `index`, or `None` if it does not exist.
    fn backbuffer(&self, index: u32) -> Option<Backbuffer>;

    /// Reclaims resources the GPU is done with, without blocking.
    fn run_garbage_collection(&mut self) {}

    /// Blocks until the GPU is idle. Returns `false` if the wait failed.
    fn wait_for_idle(&mut self) -> bool {
        true
    }

    /// Logs objects still alive. Called at shutdown when the debug runtime is on.
    fn report_live_objects(&self) {}

    /// Downcast to Any for type-specific access
    fn as_any(&self) -> &dyn std::any::Any;
}
