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

use crate::platform::input::{ButtonAction, KeyboardInput, Modifiers, MouseButton};
use crate::renderer::api::Framebuffer;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a render pass.
///
/// Passes are owned by the application and registered with the device
/// manager, which only keeps clones of the handle. They live on the thread
/// that runs the message loop.
pub type RenderPassHandle = Rc<RefCell<dyn RenderPass>>;

/// A unit of per-frame work: animation, rendering and input handling.
///
/// Every method has a no-op default. Input handlers return `true` when the
/// event was consumed, which stops it from reaching passes further down the
/// dispatch order.
pub trait RenderPass {
    /// Returns `true` if the pass wants frames while the window is unfocused.
    fn should_render_unfocused(&self) -> bool {
        false
    }

    /// Records rendering work into the given framebuffer.
    fn render(&mut self, _framebuffer: &Framebuffer) {}

    /// Advances animation by `elapsed_seconds`.
    fn animate(&mut self, _elapsed_seconds: f32) {}

    /// The backbuffers are about to be destroyed. Release anything that
    /// references them.
    fn back_buffer_resizing(&mut self) {}

    /// The backbuffers were recreated with the given size.
    fn back_buffer_resized(&mut self, _width: u32, _height: u32, _sample_count: u32) {}

    /// The DPI scale of the window changed.
    fn display_scale_changed(&mut self, _scale_x: f32, _scale_y: f32) {}

    /// A keyboard key changed state.
    fn keyboard_update(&mut self, _input: &KeyboardInput) -> bool {
        false
    }

    /// A character was typed.
    fn keyboard_char_input(&mut self, _ch: char, _modifiers: Modifiers) -> bool {
        false
    }

    /// The cursor moved, in logical pixels unless explicit display scaling is on.
    fn mouse_pos_update(&mut self, _x: f64, _y: f64) -> bool {
        false
    }

    /// The mouse wheel scrolled.
    fn mouse_scroll_update(&mut self, _delta_x: f64, _delta_y: f64) -> bool {
        false
    }

    /// A mouse button changed state.
    fn mouse_button_update(
        &mut self,
        _button: MouseButton,
        _action: ButtonAction,
        _modifiers: Modifiers,
    ) -> bool {
        false
    }

    /// A controller button changed state.
    fn joystick_button_update(&mut self, _button: u32, _pressed: bool) -> bool {
        false
    }

    /// A controller axis reported a value.
    fn joystick_axis_update(&mut self, _axis: u32, _value: f32) -> bool {
        false
    }
}
