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

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct FrameTargetState {
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    view: Option<wgpu::TextureView>,
    format: Option<wgpu::TextureFormat>,
}

/// What a render pass gets to draw with while a backbuffer is acquired.
#[derive(Debug)]
pub struct WgpuFrame<'a> {
    /// The logical device.
    pub device: &'a wgpu::Device,
    /// The queue to submit command buffers to.
    pub queue: &'a wgpu::Queue,
    /// A view of the acquired surface texture.
    pub view: &'a wgpu::TextureView,
    /// The surface format the swapchain was configured with.
    pub format: wgpu::TextureFormat,
}

/// The device, queue and current backbuffer view of a
/// [`WgpuSwapchainBackend`](super::WgpuSwapchainBackend), shared with render
/// passes.
///
/// The backend binds the device when it is created and publishes a view for
/// every acquired backbuffer. The view is withdrawn right before present.
#[derive(Debug, Default)]
pub struct WgpuFrameTarget {
    state: Mutex<FrameTargetState>,
}

impl WgpuFrameTarget {
    /// Creates an empty target.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FrameTargetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn bind_device(&self, device: wgpu::Device, queue: wgpu::Queue) {
        let mut state = self.lock();
        state.device = Some(device);
        state.queue = Some(queue);
    }

    pub(crate) fn set_view(&self, view: wgpu::TextureView, format: wgpu::TextureFormat) {
        let mut state = self.lock();
        state.view = Some(view);
        state.format = Some(format);
    }

    pub(crate) fn clear_view(&self) {
        self.lock().view = None;
    }

    pub(crate) fn clear(&self) {
        *self.lock() = FrameTargetState::default();
    }

    /// Returns `true` once a device has been bound.
    pub fn has_device(&self) -> bool {
        self.lock().device.is_some()
    }

    /// Returns the device and queue, if bound. Useful for creating resources
    /// outside of a frame.
    pub fn device_and_queue(&self) -> Option<(wgpu::Device, wgpu::Queue)> {
        let state = self.lock();
        Some((state.device.clone()?, state.queue.clone()?))
    }

    /// Runs `f` against the acquired backbuffer.
    ///
    /// Returns `None` without calling `f` when no backbuffer is acquired.
    pub fn with_frame<R>(&self, f: impl FnOnce(WgpuFrame<'_>) -> R) -> Option<R> {
        let state = self.lock();
        let frame = WgpuFrame {
            device: state.device.as_ref()?,
            queue: state.queue.as_ref()?,
            view: state.view.as_ref()?,
            format: state.format?,
        };
        Some(f(frame))
    }
}
