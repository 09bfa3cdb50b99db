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

//! Defines the error types for device, swapchain and configuration handling.

use super::api::LifecycleState;
use std::fmt;

/// A high-level error from a graphics backend or the device manager.
#[derive(Debug)]
pub enum RenderError {
    /// An operation needed a device or swapchain that has not been created.
    NotInitialized,
    /// An operation was called in a lifecycle state that does not allow it.
    InvalidState {
        /// The operation that was refused.
        operation: &'static str,
        /// The state the manager was in.
        state: LifecycleState,
    },
    /// The graphics API instance could not be created.
    InstanceCreationFailed(String),
    /// The logical device could not be created.
    DeviceCreationFailed(String),
    /// The adapter requested by index does not exist.
    AdapterNotFound {
        /// The requested adapter index.
        index: usize,
        /// How many adapters were found.
        available: usize,
    },
    /// The swapchain could not be created for the window.
    SwapchainCreationFailed(String),
    /// The window has no presentable surface.
    SurfaceUnavailable,
    /// The swapchain could not be resized. Fatal.
    SwapchainResizeFailed(String),
    /// Presenting the current frame failed.
    PresentFailed(String),
    /// The graphics device was lost.
    DeviceLost,
    /// An unexpected internal error.
    Internal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotInitialized => write!(f, "Graphics device is not initialized."),
            RenderError::InvalidState { operation, state } => {
                write!(f, "Cannot {operation} while in state {state:?}")
            }
            RenderError::InstanceCreationFailed(msg) => {
                write!(f, "Failed to create graphics instance: {msg}")
            }
            RenderError::DeviceCreationFailed(msg) => {
                write!(f, "Failed to create graphics device: {msg}")
            }
            RenderError::AdapterNotFound { index, available } => {
                write!(
                    f,
                    "Adapter index {index} is out of range ({available} adapter(s) found)"
                )
            }
            RenderError::SwapchainCreationFailed(msg) => {
                write!(f, "Failed to create swapchain: {msg}")
            }
            RenderError::SurfaceUnavailable => write!(f, "Window surface is unavailable."),
            RenderError::SwapchainResizeFailed(msg) => {
                write!(f, "Failed to resize swapchain: {msg}")
            }
            RenderError::PresentFailed(msg) => write!(f, "Failed to present frame: {msg}"),
            RenderError::DeviceLost => write!(f, "The graphics device was lost."),
            RenderError::Internal(msg) => write!(f, "Internal graphics error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// An error raised while loading device creation parameters.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration document is not valid.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read configuration '{path}': {source}")
            }
            ConfigError::Parse(err) => write!(f, "Invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = RenderError::AdapterNotFound {
            index: 3,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Adapter index 3 is out of range (1 adapter(s) found)"
        );

        let err = RenderError::InvalidState {
            operation: "create a swapchain",
            state: LifecycleState::Uninitialized,
        };
        assert_eq!(
            err.to_string(),
            "Cannot create a swapchain while in state Uninitialized"
        );
    }

    #[test]
    fn config_error_exposes_source() {
        use std::error::Error;

        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
