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

//! The public-facing entry point for Kiln applications.
//!
//! [`Engine`] creates the window, the `wgpu` backend and the
//! [`DeviceManager`], hands them to the user's [`Application`] so it can
//! register render passes and hooks, then runs the message loop until the
//! window closes.

use anyhow::Result;
use kiln_core::renderer::{CrashDumpCapture, DeviceCreationParameters, FrameMarkers};
use kiln_infra::platform::event_loop::WinitPlatform;
use kiln_infra::platform::window::WinitWindowBuilder;
use kiln_infra::{WgpuFrameTarget, WgpuSwapchainBackend};
use kiln_runtime::{DeviceManager, InputRouter};
use std::sync::Arc;

pub mod prelude {
    //! Types an application usually needs.
    pub use kiln_core::platform::{
        ButtonAction, ControllerSource, ControllerState, KeyboardInput, Modifiers, MouseButton,
    };
    pub use kiln_core::renderer::{
        DeviceCreationParameters, Framebuffer, InstanceParameters, RenderPass, RenderPassHandle,
        SwapchainFormat, WindowStartMode,
    };
    pub use kiln_core::FrameClock;
    pub use kiln_infra::{WgpuFrame, WgpuFrameTarget};
    pub use kiln_runtime::{DeviceManager, InputRouter, PipelineCallback, PipelineStage};
    pub use wgpu;
}

/// What an application gets to set itself up with.
pub struct EngineContext<'a> {
    /// The running device manager, with its device and swapchain created.
    pub device_manager: &'a mut DeviceManager,
    /// Device, queue and current backbuffer for render passes.
    pub frame_target: Arc<WgpuFrameTarget>,
}

/// A Kiln application.
pub trait Application: Sized + 'static {
    /// Called once the device and swapchain exist. Register render passes
    /// and hooks on `context.device_manager` here.
    fn new(context: EngineContext<'_>) -> Self;

    /// Called after the message loop exits, before the device is released.
    fn shutdown(&mut self, _device_manager: &mut DeviceManager) {}
}

/// The public entry point for the Kiln engine.
pub struct Engine {
    params: DeviceCreationParameters,
    title: String,
    input: Option<InputRouter>,
    crash_dump: Option<Box<dyn CrashDumpCapture>>,
    frame_markers: Option<Box<dyn FrameMarkers>>,
    skip_render_on_first_frame: bool,
}

impl Engine {
    /// Creates an engine that will open a window described by `params`.
    pub fn new(params: DeviceCreationParameters) -> Self {
        Self {
            params,
            title: "Kiln".to_string(),
            input: None,
            crash_dump: None,
            frame_markers: None,
            skip_render_on_first_frame: false,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the default input router, e.g. to attach a controller source.
    pub fn with_input_router(mut self, input: InputRouter) -> Self {
        self.input = Some(input);
        self
    }

    /// Injects a GPU crash dump capability.
    pub fn with_crash_dump_capture(mut self, capture: Box<dyn CrashDumpCapture>) -> Self {
        self.crash_dump = Some(capture);
        self
    }

    /// Injects a frame marker capability.
    pub fn with_frame_markers(mut self, markers: Box<dyn FrameMarkers>) -> Self {
        self.frame_markers = Some(markers);
        self
    }

    /// Enables the skip-render-on-first-frame mode.
    pub fn with_skip_render_on_first_frame(mut self, skip: bool) -> Self {
        self.skip_render_on_first_frame = skip;
        self
    }

    fn device_manager(&mut self, backend: WgpuSwapchainBackend) -> DeviceManager {
        let mut builder = DeviceManager::builder(Box::new(backend))
            .with_skip_render_on_first_frame(self.skip_render_on_first_frame);
        if let Some(input) = self.input.take() {
            builder = builder.with_input_router(input);
        }
        if let Some(capture) = self.crash_dump.take() {
            builder = builder.with_crash_dump_capture(capture);
        }
        if let Some(markers) = self.frame_markers.take() {
            builder = builder.with_frame_markers(markers);
        }
        builder.build()
    }

    /// Creates the window and device, then runs `A` until the window closes.
    ///
    /// Blocks the current thread, which must be the main thread.
    pub fn run<A: Application>(mut self) -> Result<()> {
        log::info!("Kiln SDK: Starting...");

        let mut platform = WinitPlatform::new()?;
        let window = platform.create_window(
            WinitWindowBuilder::from_params(&self.params).with_title(self.title.clone()),
        )?;

        let backend = WgpuSwapchainBackend::new();
        let frame_target = backend.frame_target();
        let mut manager = self.device_manager(backend);

        let params = self.params.clone();
        manager.create_window_device_and_swapchain(params, Arc::new(window), &self.title)?;
        log::info!(
            "Running on \"{}\" ({})",
            manager.renderer_name(),
            manager.graphics_api().display_name()
        );

        let mut app = A::new(EngineContext {
            device_manager: &mut manager,
            frame_target,
        });

        let result = manager.run_message_loop(&mut platform);
        if let Err(e) = &result {
            log::error!("Message loop stopped: {e}");
        }

        app.shutdown(&mut manager);
        manager.shutdown();
        log::info!("Kiln SDK: shutdown complete.");
        result.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_builder_keeps_settings() {
        let engine = Engine::new(DeviceCreationParameters {
            back_buffer_width: 800,
            back_buffer_height: 600,
            ..Default::default()
        })
        .with_title("Test")
        .with_skip_render_on_first_frame(true);

        assert_eq!(engine.title, "Test");
        assert_eq!(engine.params.back_buffer_width, 800);
        assert!(engine.skip_render_on_first_frame);
        assert!(engine.input.is_none());
    }
}
