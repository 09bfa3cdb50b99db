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

//! A `winit`-based implementation of the `KilnWindow` trait.

use kiln_core::platform::{KilnWindow, KilnWindowHandle};
use kiln_core::renderer::{DeviceCreationParameters, WindowStartMode};
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize, Size},
    error::OsError,
    event_loop::ActiveEventLoop,
    monitor::VideoModeHandle,
    window::{Fullscreen, Window, WindowAttributes},
};

/// A wrapper around a `winit::window::Window` that implements the `KilnWindow` trait.
///
/// It uses an `Arc` internally to allow for cheap cloning and shared ownership.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

impl WinitWindow {
    /// The `winit` window id, used to route events.
    pub fn winit_id(&self) -> winit::window::WindowId {
        self.inner.id()
    }
}

/// A builder for creating `WinitWindow` instances.
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    start_mode: WindowStartMode,
    position: Option<(i32, i32)>,
    refresh_rate: u32,
    allow_mode_switch: bool,
    logical_size: bool,
}

impl WinitWindowBuilder {
    /// Creates a new `WinitWindowBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            title: "Kiln".to_string(),
            width: 1280,
            height: 720,
            start_mode: WindowStartMode::Windowed,
            position: None,
            refresh_rate: 0,
            allow_mode_switch: false,
            logical_size: false,
        }
    }

    /// Takes the size, position and start mode from the device parameters.
    pub fn from_params(params: &DeviceCreationParameters) -> Self {
        Self {
            width: params.back_buffer_width,
            height: params.back_buffer_height,
            start_mode: params.start_mode,
            position: params.window_position,
            refresh_rate: params.refresh_rate,
            allow_mode_switch: params.allow_mode_switch,
            logical_size: params.resize_window_with_display_scale,
            ..Self::new()
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets how the window is first shown.
    pub fn with_start_mode(mut self, start_mode: WindowStartMode) -> Self {
        self.start_mode = start_mode;
        self
    }

    fn inner_size(&self) -> Size {
        if self.logical_size {
            LogicalSize::new(self.width, self.height).into()
        } else {
            PhysicalSize::new(self.width, self.height).into()
        }
    }

    /// Finds the primary monitor's video mode matching the requested size
    /// and refresh rate (any rate when it is 0).
    fn exclusive_mode(&self, event_loop: &ActiveEventLoop) -> Option<VideoModeHandle> {
        let monitor = event_loop.primary_monitor()?;
        monitor.video_modes().find(|mode| {
            let size = mode.size();
            size.width == self.width
                && size.height == self.height
                && (self.refresh_rate == 0
                    || mode.refresh_rate_millihertz() / 1000 == self.refresh_rate)
        })
    }

    fn attributes(&self, event_loop: &ActiveEventLoop) -> WindowAttributes {
        let mut attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.inner_size())
            .with_visible(true);
        if let Some((x, y)) = self.position {
            attributes = attributes.with_position(PhysicalPosition::new(x, y));
        }

        match self.start_mode {
            WindowStartMode::Windowed => attributes,
            WindowStartMode::Maximized => attributes.with_maximized(true),
            WindowStartMode::Borderless => attributes
                .with_decorations(false)
                .with_fullscreen(Some(Fullscreen::Borderless(None))),
            WindowStartMode::Fullscreen => {
                let exclusive = self
                    .allow_mode_switch
                    .then(|| self.exclusive_mode(event_loop))
                    .flatten();
                match exclusive {
                    Some(mode) => attributes.with_fullscreen(Some(Fullscreen::Exclusive(mode))),
                    None => {
                        log::warn!(
                            "No exclusive video mode for {}x{}; using borderless fullscreen.",
                            self.width,
                            self.height
                        );
                        attributes.with_fullscreen(Some(Fullscreen::Borderless(None)))
                    }
                }
            }
        }
    }

    /// Builds the `WinitWindow` using the provided `winit` event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{} ({:?})",
            self.title,
            self.width,
            self.height,
            self.start_mode
        );

        let window = event_loop.create_window(self.attributes(event_loop))?;

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HasWindowHandle for WinitWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.inner.window_handle()
    }
}

impl HasDisplayHandle for WinitWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.inner.display_handle()
    }
}

impl KilnWindow for WinitWindow {
    fn inner_size(&self) -> (u32, u32) {
        if self.inner.is_minimized().unwrap_or(false) {
            return (0, 0);
        }
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    fn has_focus(&self) -> bool {
        self.inner.has_focus()
    }

    fn set_title(&self, title: &str) {
        self.inner.set_title(title);
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn clone_handle_arc(&self) -> KilnWindowHandle {
        self.inner.clone()
    }

    /// Returns a stable, unique identifier for the window.
    fn id(&self) -> u64 {
        u64::from(self.inner.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_takes_window_settings_from_params() {
        let params = DeviceCreationParameters {
            back_buffer_width: 1920,
            back_buffer_height: 1080,
            start_mode: WindowStartMode::Maximized,
            window_position: Some((10, 20)),
            resize_window_with_display_scale: true,
            ..Default::default()
        };
        let builder = WinitWindowBuilder::from_params(&params).with_title("Params");

        assert_eq!((builder.width, builder.height), (1920, 1080));
        assert_eq!(builder.start_mode, WindowStartMode::Maximized);
        assert_eq!(builder.position, Some((10, 20)));
        assert_eq!(builder.title, "Params");
        assert!(matches!(builder.inner_size(), Size::Logical(_)));
    }

    #[test]
    fn test_physical_size_by_default() {
        let builder = WinitWindowBuilder::new().with_dimensions(640, 480);
        assert_eq!(
            builder.inner_size(),
            Size::Physical(PhysicalSize::new(640, 480))
        );
    }
}
