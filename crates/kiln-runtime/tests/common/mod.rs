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

//! Recording doubles for the backend, window, platform and render passes.

#![allow(dead_code)]

use kiln_core::platform::{
    KeyboardInput, KilnWindow, KilnWindowHandle, PlatformEvent, PlatformEventSource, PumpStatus,
};
use kiln_core::renderer::{
    AdapterInfo, Backbuffer, CrashDumpCapture, DeviceCreationParameters, FrameAcquire,
    FrameMarkers, Framebuffer, GraphicsApi, InstanceParameters, RenderError, RenderPass, SwapchainBackend,
};
use raw_window_handle::{DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Ordered record of every call made on the doubles.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Entries of `log` starting with `prefix`.
pub fn entries(log: &EventLog, prefix: &str) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|e| e.starts_with(prefix))
        .cloned()
        .collect()
}

/// Position of the first entry equal to `entry`.
pub fn position(log: &EventLog, entry: &str) -> Option<usize> {
    log.borrow().iter().position(|e| e == entry)
}

// --- Backend ---

/// Knobs and counters shared between a test and its [`MockBackend`].
#[derive(Default)]
pub struct MockState {
    pub fail_instance: bool,
    pub fail_device: bool,
    pub fail_swapchain: bool,
    pub fail_resize: bool,
    /// Present call (1-based) that fails.
    pub fail_present_on: Option<u32>,
    pub acquire_skipped: bool,
    pub device_lost: bool,
    /// Reported once by the next `begin_frame`.
    pub pending_swapchain_change: Option<(u32, u32)>,
    pub wait_for_idle_ok: bool,
    pub adapters: Vec<AdapterInfo>,
    pub present_calls: u32,
    pub current_index: u32,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub has_device: bool,
}

pub struct MockBackend {
    pub log: EventLog,
    pub state: Rc<RefCell<MockState>>,
    buffer_count: u32,
    sample_count: u32,
}

impl MockBackend {
    pub fn new(log: EventLog, buffer_count: u32) -> (Self, Rc<RefCell<MockState>>) {
        let state = Rc::new(RefCell::new(MockState {
            wait_for_idle_ok: true,
            adapters: vec![AdapterInfo {
                name: "Mock Adapter".to_string(),
                vendor_id: 0x10DE,
                ..Default::default()
            }],
            ..Default::default()
        }));
        (
            Self {
                log,
                state: state.clone(),
                buffer_count,
                sample_count: 1,
            },
            state,
        )
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }
}

impl SwapchainBackend for MockBackend {
    fn graphics_api(&self) -> GraphicsApi {
        GraphicsApi::Vulkan
    }

    fn renderer_name(&self) -> &str {
        "Mock Adapter"
    }

    fn create_instance(&mut self, _params: &InstanceParameters) -> Result<(), RenderError> {
        self.record("backend:create_instance");
        if self.state.borrow().fail_instance {
            return Err(RenderError::InstanceCreationFailed("mock".into()));
        }
        Ok(())
    }

    fn enumerate_adapters(&self) -> Result<Vec<AdapterInfo>, RenderError> {
        Ok(self.state.borrow().adapters.clone())
    }

    fn create_device(&mut self, params: &DeviceCreationParameters) -> Result<(), RenderError> {
        self.record("backend:create_device");
        if self.state.borrow().fail_device {
            return Err(RenderError::DeviceCreationFailed("mock".into()));
        }
        self.sample_count = params.swapchain_sample_count;
        self.state.borrow_mut().has_device = true;
        Ok(())
    }

    fn create_swapchain(
        &mut self,
        window: &dyn KilnWindow,
        params: &DeviceCreationParameters,
    ) -> Result<(), RenderError> {
        self.record("backend:create_swapchain");
        let mut state = self.state.borrow_mut();
        if state.fail_swapchain {
            return Err(RenderError::SwapchainCreationFailed("mock".into()));
        }
        let (width, height) = window.inner_size();
        state.width = width;
        state.height = height;
        state.vsync = params.vsync_enabled;
        Ok(())
    }

    fn destroy_device_and_swapchain(&mut self) {
        self.record("backend:destroy");
        self.state.borrow_mut().has_device = false;
    }

    fn resize_swapchain(&mut self, params: &DeviceCreationParameters) -> Result<(), RenderError> {
        self.record(format!(
            "backend:resize {}x{}",
            params.back_buffer_width, params.back_buffer_height
        ));
        let mut state = self.state.borrow_mut();
        if state.fail_resize {
            return Err(RenderError::Internal("mock resize".into()));
        }
        state.width = params.back_buffer_width;
        state.height = params.back_buffer_height;
        state.vsync = params.vsync_enabled;
        Ok(())
    }

    fn begin_frame(&mut self) -> FrameAcquire {
        self.record("backend:begin_frame");
        let mut state = self.state.borrow_mut();
        if state.device_lost {
            return FrameAcquire::DeviceLost;
        }
        if state.acquire_skipped {
            return FrameAcquire::Skipped;
        }
        state.current_index = (state.current_index + 1) % self.buffer_count;
        if let Some((width, height)) = state.pending_swapchain_change.take() {
            state.width = width;
            state.height = height;
            return FrameAcquire::SwapchainChanged { width, height };
        }
        FrameAcquire::Acquired
    }

    fn present(&mut self, _vsync: bool) -> Result<(), RenderError> {
        self.record("backend:present");
        let mut state = self.state.borrow_mut();
        state.present_calls += 1;
        if state.fail_present_on == Some(state.present_calls) {
            return Err(RenderError::DeviceLost);
        }
        Ok(())
    }

    fn current_backbuffer_index(&self) -> u32 {
        self.state.borrow().current_index
    }

    fn backbuffer_count(&self) -> u32 {
        self.buffer_count
    }

    fn backbuffer(&self, index: u32) -> Option<Backbuffer> {
        if index >= self.buffer_count {
            return None;
        }
        let state = self.state.borrow();
        Some(Backbuffer {
            index,
            width: state.width,
            height: state.height,
            format: Default::default(),
            sample_count: self.sample_count,
            native_handle: u64::from(index) + 1,
        })
    }

    fn run_garbage_collection(&mut self) {
        self.record("backend:gc");
    }

    fn wait_for_idle(&mut self) -> bool {
        self.record("backend:wait_for_idle");
        self.state.borrow().wait_for_idle_ok
    }

    fn report_live_objects(&self) {
        self.record("backend:report_live_objects");
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

// --- Window ---

pub struct MockWindow {
    width: AtomicU32,
    height: AtomicU32,
    scale_bits: AtomicU64,
    focused: AtomicBool,
    title: Mutex<String>,
    title_sets: AtomicU32,
}

impl MockWindow {
    pub fn new(width: u32, height: u32) -> Arc<Self> {
        Arc::new(Self {
            width: AtomicU32::new(width),
            height: AtomicU32::new(height),
            scale_bits: AtomicU64::new(1.0f64.to_bits()),
            focused: AtomicBool::new(true),
            title: Mutex::new(String::new()),
            title_sets: AtomicU32::new(0),
        })
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.width.store(width, Ordering::SeqCst);
        self.height.store(height, Ordering::SeqCst);
    }

    pub fn set_focused(&self, focused: bool) {
        self.focused.store(focused, Ordering::SeqCst);
    }

    pub fn set_scale(&self, scale: f64) {
        self.scale_bits.store(scale.to_bits(), Ordering::SeqCst);
    }

    pub fn title(&self) -> String {
        self.title.lock().unwrap().clone()
    }

    pub fn title_sets(&self) -> u32 {
        self.title_sets.load(Ordering::SeqCst)
    }
}

impl HasWindowHandle for MockWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for MockWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

/// Handle-less stand-in returned by `clone_handle_arc`.
struct NoHandle;

impl HasWindowHandle for NoHandle {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for NoHandle {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl KilnWindow for MockWindow {
    fn inner_size(&self) -> (u32, u32) {
        (
            self.width.load(Ordering::SeqCst),
            self.height.load(Ordering::SeqCst),
        )
    }

    fn scale_factor(&self) -> f64 {
        f64::from_bits(self.scale_bits.load(Ordering::SeqCst))
    }

    fn has_focus(&self) -> bool {
        self.focused.load(Ordering::SeqCst)
    }

    fn set_title(&self, title: &str) {
        *self.title.lock().unwrap() = title.to_string();
        self.title_sets.fetch_add(1, Ordering::SeqCst);
    }

    fn request_redraw(&self) {}

    fn clone_handle_arc(&self) -> KilnWindowHandle {
        Arc::new(NoHandle)
    }

    fn id(&self) -> u64 {
        1
    }
}

// --- Platform ---

/// Replays one batch of events per pump, then reports exit.
pub struct ScriptedPlatform {
    window: Arc<MockWindow>,
    batches: VecDeque<Vec<PlatformEvent>>,
    pub timeouts: Vec<Option<Duration>>,
}

impl ScriptedPlatform {
    pub fn new(window: Arc<MockWindow>, batches: Vec<Vec<PlatformEvent>>) -> Self {
        Self {
            window,
            batches: batches.into(),
            timeouts: Vec::new(),
        }
    }

    /// `frames` pumps without events.
    pub fn idle(window: Arc<MockWindow>, frames: usize) -> Self {
        Self::new(window, vec![Vec::new(); frames])
    }
}

impl PlatformEventSource for ScriptedPlatform {
    fn pump_events(
        &mut self,
        timeout: Option<Duration>,
        events: &mut Vec<PlatformEvent>,
    ) -> PumpStatus {
        self.timeouts.push(timeout);
        let Some(batch) = self.batches.pop_front() else {
            return PumpStatus::Exit;
        };
        for event in batch {
            match event {
                PlatformEvent::Resized { width, height } => self.window.set_size(width, height),
                PlatformEvent::Focused(focused) => self.window.set_focused(focused),
                _ => {}
            }
            events.push(event);
        }
        PumpStatus::Continue
    }
}

// --- Render pass ---

pub struct RecordingPass {
    pub name: &'static str,
    pub log: EventLog,
    pub consume_input: bool,
    pub render_unfocused: bool,
    /// Size announced by the last `back_buffer_resized`, cleared by `back_buffer_resizing`.
    pub known_size: Option<(u32, u32)>,
    pub rendered: Vec<Framebuffer>,
    pub keys: Vec<String>,
    pub cursor: Vec<(f64, f64)>,
    pub scales: Vec<(f32, f32)>,
    pub elapsed: Vec<f32>,
}

impl RecordingPass {
    pub fn new(name: &'static str, log: EventLog) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name,
            log,
            consume_input: false,
            render_unfocused: false,
            known_size: None,
            rendered: Vec::new(),
            keys: Vec::new(),
            cursor: Vec::new(),
            scales: Vec::new(),
            elapsed: Vec::new(),
        }))
    }

    fn record(&self, what: String) {
        self.log.borrow_mut().push(format!("{}:{what}", self.name));
    }
}

impl RenderPass for RecordingPass {
    fn should_render_unfocused(&self) -> bool {
        self.render_unfocused
    }

    fn render(&mut self, framebuffer: &Framebuffer) {
        self.record(format!(
            "render {}x{}",
            framebuffer.width(),
            framebuffer.height()
        ));
        self.rendered.push(framebuffer.clone());
    }

    fn animate(&mut self, elapsed_seconds: f32) {
        self.record("animate".to_string());
        self.elapsed.push(elapsed_seconds);
    }

    fn back_buffer_resizing(&mut self) {
        self.record("resizing".to_string());
        self.known_size = None;
    }

    fn back_buffer_resized(&mut self, width: u32, height: u32, sample_count: u32) {
        self.record(format!("resized {width}x{height}@{sample_count}"));
        self.known_size = Some((width, height));
    }

    fn display_scale_changed(&mut self, scale_x: f32, scale_y: f32) {
        self.record(format!("scale {scale_x}"));
        self.scales.push((scale_x, scale_y));
    }

    fn keyboard_update(&mut self, input: &KeyboardInput) -> bool {
        self.record(format!("key {}", input.key_code));
        self.keys.push(input.key_code.clone());
        self.consume_input
    }

    fn mouse_pos_update(&mut self, x: f64, y: f64) -> bool {
        self.cursor.push((x, y));
        self.consume_input
    }
}

// --- Crash dumps ---

pub struct MockCrashDump {
    pub log: EventLog,
}

impl CrashDumpCapture for MockCrashDump {
    fn enable_tracking(&mut self) {
        self.log.borrow_mut().push("crash:enable".to_string());
    }

    fn wait_for_crash_dump(&mut self) {
        self.log.borrow_mut().push("crash:wait".to_string());
    }
}

// --- Frame markers ---

pub struct MockFrameMarkers {
    pub log: EventLog,
}

impl FrameMarkers for MockFrameMarkers {
    fn simulation_end(&mut self, frame_index: u32) {
        self.log.borrow_mut().push(format!("marker:simulation_end {frame_index}"));
    }

    fn render_start(&mut self, frame_index: u32) {
        self.log.borrow_mut().push(format!("marker:render_start {frame_index}"));
    }

    fn render_end(&mut self, frame_index: u32) {
        self.log.borrow_mut().push(format!("marker:render_end {frame_index}"));
    }

    fn present_start(&mut self, frame_index: u32) {
        self.log.borrow_mut().push(format!("marker:present_start {frame_index}"));
    }

    fn present_end(&mut self, frame_index: u32) {
        self.log.borrow_mut().push(format!("marker:present_end {frame_index}"));
    }
}
