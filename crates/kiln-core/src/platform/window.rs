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

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

/// Combines the windowing handle traits required by graphics backends into
/// a single object-safe trait.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A shared, thread-safe handle a backend can keep alive while it owns a surface.
pub type KilnWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// A trait that abstracts the behavior of a window.
///
/// Any windowing backend (Winit, SDL2, Glfw, etc.) can implement this trait
/// to host a swapchain driven by the device manager.
pub trait KilnWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Returns the physical dimensions (width, height) of the window's inner area.
    ///
    /// A minimized window reports `(0, 0)`.
    fn inner_size(&self) -> (u32, u32);

    /// Returns the scale factor of the monitor the window is on.
    fn scale_factor(&self) -> f64;

    /// Returns `true` while the window has keyboard focus.
    fn has_focus(&self) -> bool;

    /// Replaces the window title.
    fn set_title(&self, title: &str);

    /// Requests that the window be redrawn.
    fn request_redraw(&self);

    /// Clones an Arc'd, thread-safe handle to the window.
    /// This is necessary for the backend to create a surface.
    fn clone_handle_arc(&self) -> KilnWindowHandle;

    /// Returns the unique identifier for the window.
    fn id(&self) -> u64;
}
