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

//! A `winit` event loop driven by the device manager's message loop.
//!
//! `winit` normally owns the main loop. Here it is pumped instead: every
//! message loop iteration drains whatever the OS has queued, translated to
//! [`PlatformEvent`]s, and returns control to the caller.

use super::input::WinitEventTranslator;
use super::window::{WinitWindow, WinitWindowBuilder};
use anyhow::{anyhow, Result};
use kiln_core::platform::{PlatformEvent, PlatformEventSource, PumpStatus};
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus as WinitPumpStatus};
use winit::window::WindowId;

/// How long [`WinitPlatform::create_window`] waits for the OS to hand out a window.
const WINDOW_CREATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct PlatformApp {
    pending_window: Option<WinitWindowBuilder>,
    window: Option<WinitWindow>,
    window_error: Option<OsError>,
    translator: WinitEventTranslator,
    events: Vec<PlatformEvent>,
}

impl ApplicationHandler for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(builder) = self.pending_window.take() {
            match builder.build(event_loop) {
                Ok(window) => self.window = Some(window),
                Err(e) => {
                    log::error!("Failed to create window: {e}");
                    self.window_error = Some(e);
                }
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(WinitWindow::winit_id) != Some(id) {
            return;
        }
        self.translator.translate(&event, &mut self.events);
    }
}

/// The `winit` [`PlatformEventSource`]. Owns the event loop and the window it created.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    app: PlatformApp,
}

impl WinitPlatform {
    /// Creates the event loop. Must be called on the main thread.
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            app: PlatformApp::default(),
        })
    }

    /// Creates the window, pumping the event loop until the OS delivers it.
    pub fn create_window(&mut self, builder: WinitWindowBuilder) -> Result<WinitWindow> {
        if let Some(window) = self.app.window.as_ref() {
            return Ok(window.clone());
        }
        self.app.pending_window = Some(builder);

        let deadline = Instant::now() + WINDOW_CREATION_TIMEOUT;
        loop {
            let status = self
                .event_loop
                .pump_app_events(Some(Duration::from_millis(10)), &mut self.app);
            if let Some(error) = self.app.window_error.take() {
                return Err(error.into());
            }
            if let Some(window) = self.app.window.as_ref() {
                return Ok(window.clone());
            }
            if let WinitPumpStatus::Exit(code) = status {
                return Err(anyhow!("Event loop exited with code {code} before the window was created"));
            }
            if Instant::now() >= deadline {
                return Err(anyhow!("Timed out waiting for the window to be created"));
            }
        }
    }

    /// The window created by [`Self::create_window`], if any.
    pub fn window(&self) -> Option<&WinitWindow> {
        self.app.window.as_ref()
    }
}

impl PlatformEventSource for WinitPlatform {
    fn pump_events(
        &mut self,
        timeout: Option<Duration>,
        events: &mut Vec<PlatformEvent>,
    ) -> PumpStatus {
        let status = self.event_loop.pump_app_events(timeout, &mut self.app);
        events.append(&mut self.app.events);
        match status {
            WinitPumpStatus::Continue => PumpStatus::Continue,
            WinitPumpStatus::Exit(code) => {
                log::info!("Event loop exited with code {code}");
                PumpStatus::Exit
            }
        }
    }
}
