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

//! Parameters controlling instance, device and swapchain creation.

use super::format::SwapchainFormat;
use crate::renderer::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the window is shown when it is first created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindowStartMode {
    /// A regular decorated window.
    #[default]
    Windowed,
    /// A decorated window covering the work area.
    Maximized,
    /// Exclusive fullscreen.
    Fullscreen,
    /// An undecorated window covering the monitor.
    Borderless,
}

/// Settings consumed when the graphics API instance is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceParameters {
    /// Enables the API debug runtime (validation layers, debug device).
    pub enable_debug_runtime: bool,
    /// Turns validation warnings into errors.
    pub enable_warnings_as_errors: bool,
    /// Enables GPU-based validation when the debug runtime is on.
    pub enable_gpu_validation: bool,
    /// Creates a device without any presentable surface.
    pub headless_device: bool,
    /// Enables GPU crash dump capture when a capture capability is installed.
    pub enable_crash_dumps: bool,
    /// Tracks the DPI of the monitor the window is on. When off the scale is 1.0.
    pub enable_per_monitor_dpi: bool,
}

impl Default for InstanceParameters {
    fn default() -> Self {
        Self {
            enable_debug_runtime: false,
            enable_warnings_as_errors: false,
            enable_gpu_validation: false,
            headless_device: false,
            enable_crash_dumps: false,
            enable_per_monitor_dpi: true,
        }
    }
}

/// Everything needed to create a device and its swapchain.
///
/// Loaded from JSON with [`DeviceCreationParameters::load`]; missing fields
/// keep their defaults. The device manager keeps `back_buffer_width`,
/// `back_buffer_height` and `vsync_enabled` in sync with the live swapchain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCreationParameters {
    /// Instance-level settings.
    #[serde(flatten)]
    pub instance: InstanceParameters,
    /// Initial window presentation.
    pub start_mode: WindowStartMode,
    /// Allows exclusive fullscreen to change the display mode.
    pub allow_mode_switch: bool,
    /// Initial window position, or `None` to let the OS decide.
    pub window_position: Option<(i32, i32)>,
    /// Backbuffer width in pixels.
    pub back_buffer_width: u32,
    /// Backbuffer height in pixels.
    pub back_buffer_height: u32,
    /// Refresh rate for exclusive fullscreen, 0 for the monitor default.
    pub refresh_rate: u32,
    /// Number of swapchain images.
    pub swapchain_buffer_count: u32,
    /// Swapchain color format.
    pub swapchain_format: SwapchainFormat,
    /// MSAA sample count of the swapchain.
    pub swapchain_sample_count: u32,
    /// MSAA quality level of the swapchain.
    pub swapchain_sample_quality: u32,
    /// Maximum frames the CPU may run ahead of the GPU.
    pub max_frames_in_flight: u32,
    /// Enables the backend-level command validation layer.
    pub enable_validation_layer: bool,
    /// Waits for vertical blank on present.
    pub vsync_enabled: bool,
    /// Requests an async compute queue.
    pub enable_compute_queue: bool,
    /// Requests a dedicated copy queue.
    pub enable_copy_queue: bool,
    /// Adapter to use; negative picks automatically.
    pub adapter_index: i32,
    /// Delivers pointer coordinates in physical pixels instead of dividing
    /// them by the DPI scale.
    pub support_explicit_display_scaling: bool,
    /// Interprets the backbuffer size as logical pixels when creating the window.
    pub resize_window_with_display_scale: bool,
    /// Keeps rendering from the window-move handler while the window is dragged.
    pub enable_render_during_window_movement: bool,
}

impl Default for DeviceCreationParameters {
    fn default() -> Self {
        Self {
            instance: InstanceParameters::default(),
            start_mode: WindowStartMode::Windowed,
            allow_mode_switch: false,
            window_position: None,
            back_buffer_width: 1280,
            back_buffer_height: 720,
            refresh_rate: 0,
            swapchain_buffer_count: 3,
            swapchain_format: SwapchainFormat::Srgba8Unorm,
            swapchain_sample_count: 1,
            swapchain_sample_quality: 0,
            max_frames_in_flight: 2,
            enable_validation_layer: false,
            vsync_enabled: false,
            enable_compute_queue: false,
            enable_copy_queue: false,
            adapter_index: -1,
            support_explicit_display_scaling: false,
            resize_window_with_display_scale: false,
            enable_render_during_window_movement: false,
        }
    }
}

impl DeviceCreationParameters {
    /// Parses parameters from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads parameters from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let params = Self::from_json_str(&text)?;
        log::info!("Loaded device parameters from '{}'", path.display());
        Ok(params)
    }

    /// Serializes the parameters as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The adapter index, or `None` for automatic selection.
    pub fn requested_adapter(&self) -> Option<usize> {
        usize::try_from(self.adapter_index).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test cases for the documented creation defaults
    #[test]
    fn defaults() {
        let params = DeviceCreationParameters::default();
        assert_eq!(params.back_buffer_width, 1280);
        assert_eq!(params.back_buffer_height, 720);
        assert_eq!(params.swapchain_buffer_count, 3);
        assert_eq!(params.swapchain_sample_count, 1);
        assert_eq!(params.max_frames_in_flight, 2);
        assert_eq!(params.swapchain_format, SwapchainFormat::Srgba8Unorm);
        assert_eq!(params.requested_adapter(), None);
        assert!(!params.vsync_enabled);
        assert!(params.instance.enable_per_monitor_dpi);
    }

    /// A partial document only overrides the fields it names
    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "back_buffer_width": 1920,
            "vsync_enabled": true,
            "enable_debug_runtime": true,
            "start_mode": "Borderless",
            "adapter_index": 1
        }"#;
        let params = DeviceCreationParameters::from_json_str(json).unwrap();
        assert_eq!(params.back_buffer_width, 1920);
        assert_eq!(params.back_buffer_height, 720);
        assert!(params.vsync_enabled);
        assert!(params.instance.enable_debug_runtime);
        assert_eq!(params.start_mode, WindowStartMode::Borderless);
        assert_eq!(params.requested_adapter(), Some(1));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = DeviceCreationParameters::from_json_str("{ \"back_buffer_width\": \"wide\" }")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DeviceCreationParameters::load("/definitely/not/here.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("here.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_output_reloads_identically() {
        let mut params = DeviceCreationParameters::default();
        params.window_position = Some((10, 20));
        params.swapchain_format = SwapchainFormat::Rgba16Float;
        let json = params.to_json_string().unwrap();
        assert_eq!(DeviceCreationParameters::from_json_str(&json).unwrap(), params);
    }
}
