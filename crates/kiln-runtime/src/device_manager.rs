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

//! The device manager: lifecycle of the instance, device and swapchain, the
//! per-tick animate/render/present pipeline and the message loop.

use crate::callbacks::{PipelineCallback, PipelineCallbacks, PipelineStage};
use crate::input_router::{InputRouter, PointerScaling};
use crate::pass_list::RenderPassList;
use kiln_core::platform::{KilnWindow, PlatformEvent, PlatformEventSource, PumpStatus};
use kiln_core::renderer::{
    AdapterInfo, CrashDumpCapture, DeviceCreationParameters, FrameAcquire, FrameMarkers,
    Framebuffer, FramebufferId, GraphicsApi, InstanceParameters, LifecycleState, RenderError,
    RenderPassHandle, SwapchainBackend,
};
use kiln_core::FrameClock;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

/// Builds a [`DeviceManager`] with its optional collaborators.
pub struct DeviceManagerBuilder {
    backend: Box<dyn SwapchainBackend>,
    input: InputRouter,
    crash_dump: Option<Box<dyn CrashDumpCapture>>,
    frame_markers: Option<Box<dyn FrameMarkers>>,
    skip_render_on_first_frame: bool,
}

impl DeviceManagerBuilder {
    /// Uses `input` instead of a default router.
    pub fn with_input_router(mut self, input: InputRouter) -> Self {
        self.input = input;
        self
    }

    /// Installs a crash dump capture integration.
    pub fn with_crash_dump_capture(mut self, capture: Box<dyn CrashDumpCapture>) -> Self {
        self.crash_dump = Some(capture);
        self
    }

    /// Installs a frame marker integration.
    pub fn with_frame_markers(mut self, markers: Box<dyn FrameMarkers>) -> Self {
        self.frame_markers = Some(markers);
        self
    }

    /// Animates the first frame without rendering it.
    pub fn with_skip_render_on_first_frame(mut self, skip: bool) -> Self {
        self.skip_render_on_first_frame = skip;
        self
    }

    /// Creates the manager. Nothing is created on the backend yet.
    pub fn build(self) -> DeviceManager {
        DeviceManager {
            backend: self.backend,
            params: DeviceCreationParameters::default(),
            state: LifecycleState::Uninitialized,
            instance_created: false,
            window: None,
            window_title: String::new(),
            passes: RenderPassList::new(),
            framebuffers: Vec::new(),
            next_framebuffer_id: 0,
            clock: FrameClock::new(),
            input: self.input,
            callbacks: PipelineCallbacks::default(),
            crash_dump: self.crash_dump,
            frame_markers: self.frame_markers,
            dpi_scale: (1.0, 1.0),
            previous_dpi_scale: (0.0, 0.0),
            frame_index: 0,
            skip_render_on_first_frame: self.skip_render_on_first_frame,
            window_visible: false,
            window_focused: true,
            requested_vsync: false,
            exit_requested: false,
        }
    }
}

/// Owns a graphics backend and drives it frame by frame.
///
/// The manager walks the backend through instance, device and swapchain
/// creation, keeps one [`Framebuffer`] per backbuffer, and runs registered
/// render passes through animate, render and present on every tick. All of
/// it happens on the thread that runs the message loop.
pub struct DeviceManager {
    backend: Box<dyn SwapchainBackend>,
    params: DeviceCreationParameters,
    state: LifecycleState,
    instance_created: bool,
    window: Option<Arc<dyn KilnWindow>>,
    window_title: String,
    passes: RenderPassList,
    framebuffers: Vec<Framebuffer>,
    next_framebuffer_id: u64,
    clock: FrameClock,
    input: InputRouter,
    callbacks: PipelineCallbacks,
    crash_dump: Option<Box<dyn CrashDumpCapture>>,
    frame_markers: Option<Box<dyn FrameMarkers>>,
    dpi_scale: (f32, f32),
    previous_dpi_scale: (f32, f32),
    frame_index: u32,
    skip_render_on_first_frame: bool,
    window_visible: bool,
    window_focused: bool,
    requested_vsync: bool,
    exit_requested: bool,
}

impl DeviceManager {
    /// Starts building a manager around `backend`.
    pub fn builder(backend: Box<dyn SwapchainBackend>) -> DeviceManagerBuilder {
        DeviceManagerBuilder {
            backend,
            input: InputRouter::new(),
            crash_dump: None,
            frame_markers: None,
            skip_render_on_first_frame: false,
        }
    }

    /// Creates a manager without optional collaborators.
    pub fn new(backend: Box<dyn SwapchainBackend>) -> Self {
        Self::builder(backend).build()
    }

    // --- Creation ---

    /// Creates the graphics API instance. Calling it again is a no-op.
    pub fn create_instance(&mut self, params: &InstanceParameters) -> Result<(), RenderError> {
        if self.instance_created {
            return Ok(());
        }
        if self.state != LifecycleState::Uninitialized {
            return Err(RenderError::InvalidState {
                operation: "create an instance",
                state: self.state,
            });
        }

        self.params.instance = params.clone();
        if params.enable_crash_dumps {
            if let Some(capture) = self.crash_dump.as_mut() {
                capture.enable_tracking();
            }
        }

        self.backend.create_instance(params)?;
        self.instance_created = true;
        self.state = LifecycleState::InstanceCreated;
        log::info!(
            "{} instance created",
            self.backend.graphics_api().display_name()
        );
        Ok(())
    }

    /// Lists the adapters of the instance.
    pub fn enumerate_adapters(&self) -> Result<Vec<AdapterInfo>, RenderError> {
        if !self.instance_created {
            return Err(RenderError::NotInitialized);
        }
        self.backend.enumerate_adapters()
    }

    /// Creates an instance and a device without any surface.
    pub fn create_headless_device(
        &mut self,
        params: DeviceCreationParameters,
    ) -> Result<(), RenderError> {
        self.ensure_can_create_device("create a headless device")?;

        self.params = params;
        self.params.instance.headless_device = true;

        let instance_params = self.params.instance.clone();
        self.create_instance(&instance_params)?;
        if self.state != LifecycleState::DeviceCreated {
            self.create_device()?;
        }
        log::info!("Headless device ready on '{}'", self.backend.renderer_name());
        Ok(())
    }

    /// Creates an instance, a device and a swapchain for `window`, then sizes
    /// the backbuffers to the window.
    pub fn create_window_device_and_swapchain(
        &mut self,
        params: DeviceCreationParameters,
        window: Arc<dyn KilnWindow>,
        window_title: &str,
    ) -> Result<(), RenderError> {
        self.ensure_can_create_device("create a device and swapchain")?;

        self.params = params;
        self.params.instance.headless_device = false;
        self.requested_vsync = self.params.vsync_enabled;

        let instance_params = self.params.instance.clone();
        self.create_instance(&instance_params)?;

        window.set_title(window_title);
        self.window_title = window_title.to_string();
        self.update_dpi_scale(window.scale_factor());

        // A device left by a failed swapchain attempt is reused.
        if self.state != LifecycleState::DeviceCreated {
            self.create_device()?;
        }

        self.backend.create_swapchain(window.as_ref(), &self.params)?;
        self.window = Some(window);
        self.state = LifecycleState::SwapchainCreated;
        log::info!(
            "Swapchain created: {} buffer(s), {:?}",
            self.params.swapchain_buffer_count,
            self.params.swapchain_format
        );

        self.window_visible = true;
        // Zeroed so the first size assignment always runs the resize protocol.
        self.params.back_buffer_width = 0;
        self.params.back_buffer_height = 0;
        self.update_window_size()
    }

    fn ensure_can_create_device(&self, operation: &'static str) -> Result<(), RenderError> {
        match self.state {
            LifecycleState::Uninitialized
            | LifecycleState::InstanceCreated
            | LifecycleState::DeviceCreated => Ok(()),
            state => Err(RenderError::InvalidState { operation, state }),
        }
    }

    fn create_device(&mut self) -> Result<(), RenderError> {
        if let Some(index) = self.params.requested_adapter() {
            let adapters = self.backend.enumerate_adapters()?;
            if index >= adapters.len() {
                return Err(RenderError::AdapterNotFound {
                    index,
                    available: adapters.len(),
                });
            }
        }
        self.backend.create_device(&self.params)?;
        self.state = LifecycleState::DeviceCreated;
        log::info!("Device created on '{}'", self.backend.renderer_name());
        Ok(())
    }

    // --- Render passes ---

    /// Registers `pass` at the front of the list, moving it if needed.
    pub fn add_render_pass_to_front(&mut self, pass: RenderPassHandle) {
        self.passes.add_to_front(pass.clone());
        self.announce_backbuffers(&pass);
    }

    /// Registers `pass` at the back of the list, moving it if needed.
    pub fn add_render_pass_to_back(&mut self, pass: RenderPassHandle) {
        self.passes.add_to_back(pass.clone());
        self.announce_backbuffers(&pass);
    }

    /// Unregisters `pass`. Returns `true` if it was registered.
    pub fn remove_render_pass(&mut self, pass: &RenderPassHandle) -> bool {
        self.passes.remove(pass)
    }

    /// The registered passes, in animate/render order.
    pub fn render_passes(&self) -> &RenderPassList {
        &self.passes
    }

    /// Gives a pass added while running the current backbuffer size.
    fn announce_backbuffers(&self, pass: &RenderPassHandle) {
        if self.framebuffers.is_empty() {
            return;
        }
        let mut pass = pass.borrow_mut();
        pass.back_buffer_resizing();
        pass.back_buffer_resized(
            self.params.back_buffer_width,
            self.params.back_buffer_height,
            self.params.swapchain_sample_count,
        );
    }

    /// Returns `true` if any pass wants frames while unfocused. Passes are
    /// asked in dispatch order.
    pub fn should_render_unfocused(&self) -> bool {
        self.passes
            .dispatch_order()
            .any(|pass| pass.borrow().should_render_unfocused())
    }

    // --- Resize protocol ---

    /// Re-reads the window size and resizes the swapchain when the size or
    /// the requested vsync changed.
    pub fn update_window_size(&mut self) -> Result<(), RenderError> {
        let Some(window) = self.window.as_ref() else {
            self.window_visible = false;
            return Ok(());
        };

        let (width, height) = window.inner_size();
        if width == 0 || height == 0 {
            // Minimized.
            self.window_visible = false;
            return Ok(());
        }

        self.window_visible = true;
        self.window_focused = window.has_focus();

        if width != self.params.back_buffer_width
            || height != self.params.back_buffer_height
            || self.params.vsync_enabled != self.requested_vsync
        {
            self.resize_swapchain(width, height, self.requested_vsync)?;
        }
        Ok(())
    }

    fn resize_swapchain(&mut self, width: u32, height: u32, vsync: bool) -> Result<(), RenderError> {
        log::debug!(
            "Resizing backbuffers {}x{} -> {width}x{height} (vsync: {vsync})",
            self.params.back_buffer_width,
            self.params.back_buffer_height
        );
        self.state = LifecycleState::Resizing;
        self.back_buffer_resizing();

        self.params.back_buffer_width = width;
        self.params.back_buffer_height = height;
        self.params.vsync_enabled = vsync;

        if let Err(err) = self.backend.resize_swapchain(&self.params) {
            log::error!("Swapchain resize to {width}x{height} failed: {err}");
            return Err(match err {
                RenderError::SwapchainResizeFailed(_) => err,
                other => RenderError::SwapchainResizeFailed(other.to_string()),
            });
        }

        self.back_buffer_resized();
        self.state = LifecycleState::Running;
        Ok(())
    }

    fn back_buffer_resizing(&mut self) {
        self.framebuffers.clear();
        for pass in self.passes.iter() {
            pass.borrow_mut().back_buffer_resizing();
        }
    }

    fn back_buffer_resized(&mut self) {
        self.framebuffers.clear();
        for index in 0..self.backend.backbuffer_count() {
            match self.backend.backbuffer(index) {
                Some(backbuffer) => {
                    self.next_framebuffer_id += 1;
                    self.framebuffers.push(Framebuffer {
                        id: FramebufferId(self.next_framebuffer_id),
                        backbuffer,
                    });
                }
                None => log::warn!("Backend reported no backbuffer at index {index}"),
            }
        }

        let (width, height, samples) = (
            self.params.back_buffer_width,
            self.params.back_buffer_height,
            self.params.swapchain_sample_count,
        );
        for pass in self.passes.iter() {
            pass.borrow_mut().back_buffer_resized(width, height, samples);
        }
    }

    // --- Tick ---

    /// Runs one tick: input, animate, render and present.
    ///
    /// Returns an error when presenting failed or the device was lost; the
    /// caller is expected to stop the loop.
    pub fn animate_render_present(&mut self) -> Result<(), RenderError> {
        let sample = self.clock.sample();

        self.dispatch_pending_input();

        if !self.window_visible {
            return Ok(());
        }

        if self.params.vsync_enabled != self.requested_vsync {
            let (width, height) = (self.params.back_buffer_width, self.params.back_buffer_height);
            self.resize_swapchain(width, height, self.requested_vsync)?;
        }

        if self.window_focused || self.should_render_unfocused() {
            if self.dpi_scale != self.previous_dpi_scale {
                let (scale_x, scale_y) = self.dpi_scale;
                log::debug!("Display scale changed to {scale_x}x{scale_y}");
                for pass in self.passes.iter() {
                    pass.borrow_mut().display_scale_changed(scale_x, scale_y);
                }
                self.previous_dpi_scale = self.dpi_scale;
            }

            let frame_index = self.frame_index;
            self.run_callback(PipelineStage::BeforeAnimate, frame_index);
            let elapsed = sample.elapsed as f32;
            for pass in self.passes.iter() {
                pass.borrow_mut().animate(elapsed);
            }
            self.run_callback(PipelineStage::AfterAnimate, frame_index);
            if let Some(markers) = self.frame_markers.as_mut() {
                markers.simulation_end(frame_index);
            }

            if frame_index > 0 || !self.skip_render_on_first_frame {
                let render_index = if self.skip_render_on_first_frame {
                    frame_index - 1
                } else {
                    frame_index
                };

                match self.backend.begin_frame() {
                    FrameAcquire::Acquired => self.render_and_present(render_index)?,
                    FrameAcquire::SwapchainChanged { width, height } => {
                        let vsync = self.params.vsync_enabled;
                        self.resize_swapchain(width, height, vsync)?;
                        self.render_and_present(render_index)?;
                    }
                    FrameAcquire::Skipped => {
                        log::trace!("No backbuffer for frame {render_index}, skipping render")
                    }
                    FrameAcquire::DeviceLost => {
                        log::error!("Device lost while acquiring frame {render_index}");
                        return Err(RenderError::DeviceLost);
                    }
                }
            }
        }

        self.backend.run_garbage_collection();
        self.clock.finish_frame(sample);
        self.frame_index = self.frame_index.wrapping_add(1);
        Ok(())
    }

    fn render_and_present(&mut self, render_index: u32) -> Result<(), RenderError> {
        if let Some(markers) = self.frame_markers.as_mut() {
            markers.render_start(render_index);
        }
        self.run_callback(PipelineStage::BeforeRender, render_index);

        match self.current_framebuffer() {
            Some(framebuffer) => {
                for pass in self.passes.iter() {
                    pass.borrow_mut().render(framebuffer);
                }
            }
            None => log::warn!(
                "No framebuffer for backbuffer {}",
                self.backend.current_backbuffer_index()
            ),
        }

        if let Some(markers) = self.frame_markers.as_mut() {
            markers.render_end(render_index);
        }
        self.run_callback(PipelineStage::AfterRender, render_index);

        self.run_callback(PipelineStage::BeforePresent, render_index);
        if let Some(markers) = self.frame_markers.as_mut() {
            markers.present_start(render_index);
        }
        let presented = self.backend.present(self.params.vsync_enabled);
        if let Some(markers) = self.frame_markers.as_mut() {
            markers.present_end(render_index);
        }
        self.run_callback(PipelineStage::AfterPresent, render_index);

        presented.inspect_err(|err| log::error!("Present failed for frame {render_index}: {err}"))
    }

    fn run_callback(&mut self, stage: PipelineStage, frame_index: u32) {
        if let Some(mut callback) = self.callbacks.take(stage) {
            callback(&*self, frame_index);
            self.callbacks.restore(stage, callback);
        }
    }

    fn dispatch_pending_input(&mut self) {
        let scaling = self.pointer_scaling();
        self.input.update_controllers(&self.passes);
        self.input.flush(&self.passes, scaling);
    }

    fn pointer_scaling(&self) -> PointerScaling {
        PointerScaling {
            scale_x: self.dpi_scale.0,
            scale_y: self.dpi_scale.1,
            explicit: self.params.support_explicit_display_scaling,
        }
    }

    // --- Message loop ---

    /// Pumps platform events and ticks until the platform asks to exit or a
    /// tick fails.
    ///
    /// On exit the device is idle-waited. If the loop ended on a failure and
    /// crash dumps are enabled, this also waits for the crash dump.
    pub fn run_message_loop(
        &mut self,
        platform: &mut dyn PlatformEventSource,
    ) -> Result<(), RenderError> {
        match self.state {
            LifecycleState::SwapchainCreated | LifecycleState::Running => {}
            state => {
                return Err(RenderError::InvalidState {
                    operation: "run the message loop",
                    state,
                })
            }
        }

        log::info!("Entering message loop");
        self.clock.reset();
        self.exit_requested = false;

        let mut events = Vec::new();
        let mut result = Ok(());
        loop {
            self.run_callback(PipelineStage::BeforeFrame, self.frame_index);

            let timeout = if self.window_visible {
                Some(Duration::ZERO)
            } else {
                None
            };
            let status = platform.pump_events(timeout, &mut events);

            for event in events.drain(..) {
                if let Err(err) = self.handle_platform_event(event) {
                    result = Err(err);
                    break;
                }
            }
            events.clear();

            if result.is_err() || status == PumpStatus::Exit || self.exit_requested {
                break;
            }

            if self.window_visible {
                if let Err(err) = self.animate_render_present() {
                    result = Err(err);
                    break;
                }
            } else {
                self.dispatch_pending_input();
            }
        }

        let idle = self.backend.wait_for_idle();
        if !idle {
            log::warn!("Waiting for the device to go idle failed");
        }

        if (result.is_err() || !idle) && self.params.instance.enable_crash_dumps {
            if let Some(capture) = self.crash_dump.as_mut() {
                log::info!("Waiting for GPU crash dump to complete");
                capture.wait_for_crash_dump();
            }
        }

        match &result {
            Ok(()) => log::info!("Message loop finished after {} frame(s)", self.frame_index),
            Err(err) => log::error!("Message loop stopped: {err}"),
        }
        result
    }

    /// Applies one platform event. Input is queued for the next tick; window
    /// events take effect immediately.
    pub fn handle_platform_event(&mut self, event: PlatformEvent) -> Result<(), RenderError> {
        match event {
            PlatformEvent::Input(input) => self.input.queue(input),
            PlatformEvent::Resized { .. } => self.update_window_size()?,
            PlatformEvent::Moved { x, y } => self.window_pos_callback(x, y)?,
            PlatformEvent::ScaleFactorChanged(scale) => self.update_dpi_scale(scale),
            PlatformEvent::Focused(focused) => self.window_focus_callback(focused),
            PlatformEvent::Occluded(true) => self.window_visible = false,
            PlatformEvent::Occluded(false) => self.update_window_size()?,
            PlatformEvent::Destroyed => {
                log::warn!("Window destroyed, rendering paused");
                self.window = None;
                self.window_visible = false;
            }
            PlatformEvent::CloseRequested => self.exit_requested = true,
        }
        Ok(())
    }

    /// The window moved: refreshes the DPI scale and, when enabled, renders
    /// a frame so the content keeps up with the drag.
    pub fn window_pos_callback(&mut self, x: i32, y: i32) -> Result<(), RenderError> {
        log::trace!("Window moved to ({x}, {y})");
        if let Some(scale) = self.window.as_ref().map(|w| w.scale_factor()) {
            self.update_dpi_scale(scale);
        }

        if self.params.enable_render_during_window_movement && !self.framebuffers.is_empty() {
            self.run_callback(PipelineStage::BeforeFrame, self.frame_index);
            self.animate_render_present()?;
        }
        Ok(())
    }

    /// Records a focus change.
    pub fn window_focus_callback(&mut self, focused: bool) {
        self.window_focused = focused;
    }

    fn update_dpi_scale(&mut self, scale: f64) {
        self.dpi_scale = if self.params.instance.enable_per_monitor_dpi {
            (scale as f32, scale as f32)
        } else {
            (1.0, 1.0)
        };
    }

    // --- Window title ---

    /// Sets the window title, skipping the platform call when unchanged.
    pub fn set_window_title(&mut self, title: &str) {
        if self.window_title == title {
            return;
        }
        if let Some(window) = self.window.as_ref() {
            window.set_title(title);
        }
        self.window_title = title.to_string();
    }

    /// Sets a title naming the API, debug layers and, optionally, the frame rate.
    pub fn set_informative_window_title(
        &mut self,
        app_name: &str,
        include_framerate: bool,
        extra_info: Option<&str>,
    ) {
        let title = self.informative_window_title(app_name, include_framerate, extra_info);
        self.set_window_title(&title);
    }

    /// Builds the title used by [`DeviceManager::set_informative_window_title`].
    pub fn informative_window_title(
        &self,
        app_name: &str,
        include_framerate: bool,
        extra_info: Option<&str>,
    ) -> String {
        let api = self.backend.graphics_api();
        let mut title = format!("{app_name} ({}", api.display_name());

        if self.params.instance.enable_debug_runtime {
            if api == GraphicsApi::Vulkan {
                title.push_str(", VulkanValidationLayer");
            } else {
                title.push_str(", DebugRuntime");
            }
        }
        if self.params.enable_validation_layer {
            title.push_str(", ValidationLayer");
        }
        title.push(')');

        let fps = self.clock.frames_per_second();
        if include_framerate && fps > 0.0 {
            let precision: usize = if fps <= 20.0 { 1 } else { 0 };
            let _ = write!(title, " - {fps:.precision$} FPS ");
        }

        if let Some(extra) = extra_info {
            title.push_str(extra);
        }
        title
    }

    /// The current window title.
    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    // --- Shutdown ---

    /// Releases the framebuffers, the device, the swapchain and the window.
    /// Registered passes and hooks are kept.
    pub fn shutdown(&mut self) {
        if self.state == LifecycleState::Uninitialized && !self.instance_created {
            return;
        }
        log::info!("Shutting down device manager");
        self.state = LifecycleState::ShuttingDown;

        self.framebuffers.clear();
        if let Some(markers) = self.frame_markers.as_mut() {
            markers.shutdown();
        }
        self.backend.destroy_device_and_swapchain();
        if self.params.instance.enable_debug_runtime {
            self.backend.report_live_objects();
        }

        self.window = None;
        self.window_visible = false;
        self.instance_created = false;
        self.state = LifecycleState::Uninitialized;
    }

    // --- Accessors ---

    /// Registers or clears the hook for `stage`.
    pub fn set_callback(&mut self, stage: PipelineStage, callback: Option<PipelineCallback>) {
        self.callbacks.set(stage, callback);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The parameters the device was created with, kept in sync with the
    /// live backbuffer size and vsync.
    pub fn device_params(&self) -> &DeviceCreationParameters {
        &self.params
    }

    /// Backbuffer size in pixels.
    pub fn window_dimensions(&self) -> (u32, u32) {
        (self.params.back_buffer_width, self.params.back_buffer_height)
    }

    /// Current DPI scale as `(x, y)`.
    pub fn dpi_scale_info(&self) -> (f32, f32) {
        self.dpi_scale
    }

    /// Returns `true` while the window can be presented to.
    pub fn is_window_visible(&self) -> bool {
        self.window_visible
    }

    /// Returns `true` while the window has focus.
    pub fn is_window_focused(&self) -> bool {
        self.window_focused
    }

    /// The window hosting the swapchain.
    pub fn window(&self) -> Option<&Arc<dyn KilnWindow>> {
        self.window.as_ref()
    }

    /// Index of the next tick.
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Animates the first frame without rendering it.
    pub fn set_skip_render_on_first_frame(&mut self, skip: bool) {
        self.skip_render_on_first_frame = skip;
    }

    /// Average frame time in seconds.
    pub fn average_frame_time_seconds(&self) -> f64 {
        self.clock.average_frame_time()
    }

    /// Timestamp of the last completed tick, in seconds.
    pub fn previous_frame_timestamp(&self) -> f64 {
        self.clock.previous_timestamp()
    }

    /// Sets the interval over which frame times are averaged.
    pub fn set_frame_time_update_interval(&mut self, seconds: f64) {
        self.clock.set_update_interval(seconds);
    }

    /// The vsync setting of the live swapchain.
    pub fn is_vsync_enabled(&self) -> bool {
        self.params.vsync_enabled
    }

    /// Requests a vsync change. It takes effect at the next visible tick or
    /// window size update, whichever comes first.
    pub fn set_vsync_enabled(&mut self, enabled: bool) {
        self.requested_vsync = enabled;
    }

    /// Enables rendering from the window-move handler.
    pub fn set_enable_render_during_window_movement(&mut self, enabled: bool) {
        self.params.enable_render_during_window_movement = enabled;
    }

    /// The framebuffer of the backbuffer acquired for the current frame.
    pub fn current_framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer(self.backend.current_backbuffer_index())
    }

    /// The framebuffer wrapping backbuffer `index`, or `None` if out of range.
    pub fn framebuffer(&self, index: u32) -> Option<&Framebuffer> {
        self.framebuffers.get(index as usize)
    }

    /// Number of framebuffers. Matches the backbuffer count outside a resize.
    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.len()
    }

    /// The API driven by the backend.
    pub fn graphics_api(&self) -> GraphicsApi {
        self.backend.graphics_api()
    }

    /// The adapter name reported by the backend.
    pub fn renderer_name(&self) -> &str {
        self.backend.renderer_name()
    }

    /// The backend, for API-specific access through `as_any`.
    pub fn backend(&self) -> &dyn SwapchainBackend {
        self.backend.as_ref()
    }

    /// The input router, to queue events or manage controllers.
    pub fn input_router_mut(&mut self) -> &mut InputRouter {
        &mut self.input
    }
}

impl Drop for DeviceManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
