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

//! Engine-side input vocabulary, independent of any windowing library.
//!
//! Platform layers translate their native events into [`InputEvent`]s; the
//! device manager routes them to render passes.

/// Whether a key or button went down, came up, or auto-repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// The key or button was pressed.
    Press,
    /// The key or button was released.
    Release,
    /// The key is held and the OS generated a repeat.
    Repeat,
}

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Either shift key is held.
    pub shift: bool,
    /// Either control key is held.
    pub control: bool,
    /// Either alt key is held.
    pub alt: bool,
    /// The platform "super" key (Windows / Command) is held.
    pub super_key: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        super_key: false,
    };

    /// Returns `true` if no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// An engine-internal representation of a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// A physical key transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardInput {
    /// A string representation of the physical key code (e.g. `"KeyA"`).
    pub key_code: String,
    /// Platform scancode, when the platform exposes one.
    pub scancode: Option<u32>,
    /// Press, release or repeat.
    pub action: ButtonAction,
    /// Modifiers held during the transition.
    pub modifiers: Modifiers,
}

/// An engine-internal representation of a user input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard key changed state.
    Keyboard(KeyboardInput),
    /// Text input produced a character.
    Character {
        /// The produced character.
        ch: char,
        /// Modifiers held while typing.
        modifiers: Modifiers,
    },
    /// The mouse cursor moved, in physical pixels relative to the window.
    MouseMoved {
        /// The new x-coordinate of the cursor.
        x: f64,
        /// The new y-coordinate of the cursor.
        y: f64,
    },
    /// A mouse button changed state.
    MouseButton {
        /// The button.
        button: MouseButton,
        /// Press or release.
        action: ButtonAction,
        /// Modifiers held during the click.
        modifiers: Modifiers,
    },
    /// The mouse wheel was scrolled.
    MouseWheelScrolled {
        /// The horizontal scroll delta.
        delta_x: f64,
        /// The vertical scroll delta.
        delta_y: f64,
    },
    /// A controller button changed state.
    ControllerButton {
        /// Button index.
        button: u32,
        /// `true` while held.
        pressed: bool,
    },
    /// A controller axis reported a value.
    ControllerAxis {
        /// Axis index.
        axis: u32,
        /// Axis value, usually in `[-1, 1]`.
        value: f32,
    },
}

/// Snapshot of one controller.
///
/// Axes 0/1 and 2/3 are interpreted as the left and right thumbsticks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    /// Raw axis values.
    pub axes: Vec<f32>,
    /// Button states, `true` while held.
    pub buttons: Vec<bool>,
}

/// Provides controller state to the input router.
pub trait ControllerSource {
    /// Returns the current state of `device_id`, or `None` if it is not
    /// connected anymore.
    fn poll(&mut self, device_id: u32) -> Option<ControllerState>;
}
