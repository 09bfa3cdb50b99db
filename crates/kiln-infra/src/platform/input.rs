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

//! Provides translation from a concrete windowing backend (`winit`) to the engine's abstract events.
//!
//! This module acts as an adapter layer, decoupling the rest of the engine from the
//! specific event format of the `winit` crate.

use kiln_core::platform::{
    ButtonAction, InputEvent, KeyboardInput, Modifiers, MouseButton, PlatformEvent,
};
use winit::event::{
    ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{ModifiersState, PhysicalKey};

/// Translates `winit` window events into [`PlatformEvent`]s, tracking the
/// modifier state that `winit` reports separately from key presses.
#[derive(Debug, Default, Clone)]
pub struct WinitEventTranslator {
    modifiers: Modifiers,
}

impl WinitEventTranslator {
    /// Creates a translator with no modifier held.
    pub fn new() -> Self {
        Self::default()
    }

    /// The modifier state as of the last translated event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Appends the engine events produced by `event` to `out`.
    ///
    /// A key press that produces text yields the key event followed by one
    /// character event per printable character.
    pub fn translate(&mut self, event: &WindowEvent, out: &mut Vec<PlatformEvent>) {
        if let WindowEvent::ModifiersChanged(modifiers) = event {
            self.modifiers = translate_modifiers(modifiers.state());
            return;
        }
        if let Some(window_event) = translate_window_event(event) {
            out.push(window_event);
            return;
        }
        if let Some(input) = translate_winit_input(event, self.modifiers) {
            out.push(PlatformEvent::Input(input));
        }
        if let WindowEvent::KeyboardInput { event: key_event, .. } = event {
            out.extend(
                translate_text(key_event, self.modifiers)
                    .into_iter()
                    .map(PlatformEvent::Input),
            );
        }
    }
}

/// Translates the window-level part of a `winit` event (size, position,
/// focus, visibility, lifetime). Returns `None` for input and other events.
pub fn translate_window_event(event: &WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::Resized(size) => Some(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::Moved(position) => Some(PlatformEvent::Moved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            Some(PlatformEvent::ScaleFactorChanged(*scale_factor))
        }
        WindowEvent::Focused(focused) => Some(PlatformEvent::Focused(*focused)),
        WindowEvent::Occluded(occluded) => Some(PlatformEvent::Occluded(*occluded)),
        WindowEvent::Destroyed => Some(PlatformEvent::Destroyed),
        WindowEvent::CloseRequested => Some(PlatformEvent::CloseRequested),
        _ => None,
    }
}

/// Translates a `winit::event::WindowEvent` into Kiln's `InputEvent` format.
///
/// Text produced by a key press is not part of the result; see
/// [`WinitEventTranslator::translate`].
///
/// # Returns
///
/// Returns `Some(InputEvent)` if the event is a recognized input action, or `None` otherwise.
pub fn translate_winit_input(event: &WindowEvent, modifiers: Modifiers) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => Some(InputEvent::Keyboard(KeyboardInput {
            key_code: map_physical_key_to_string(key_event.physical_key),
            scancode: scancode(key_event.physical_key),
            action: map_key_action(key_event.state, key_event.repeat),
            modifiers,
        })),
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::MouseButton {
            button: map_mouse_button(*button),
            action: map_key_action(*state, false),
            modifiers,
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy): (f64, f64) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (f64::from(*x), f64::from(*y)),
                MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
            };
            if dx != 0.0 || dy != 0.0 {
                Some(InputEvent::MouseWheelScrolled {
                    delta_x: dx,
                    delta_y: dy,
                })
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Printable characters produced by a key press.
pub fn translate_text(key_event: &KeyEvent, modifiers: Modifiers) -> Vec<InputEvent> {
    if key_event.state != ElementState::Pressed {
        return Vec::new();
    }
    key_event
        .text
        .as_ref()
        .map(|text| text_to_characters(text.as_str(), modifiers))
        .unwrap_or_default()
}

/// Maps `winit` modifier state to the engine's [`Modifiers`].
pub fn translate_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        super_key: state.super_key(),
    }
}

// --- Private Helper Functions ---

fn text_to_characters(text: &str, modifiers: Modifiers) -> Vec<InputEvent> {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| InputEvent::Character { ch, modifiers })
        .collect()
}

/// (Internal) Maps a physical key to its string representation.
fn map_physical_key_to_string(key: PhysicalKey) -> String {
    match key {
        PhysicalKey::Code(keycode) => format!("{keycode:?}"),
        PhysicalKey::Unidentified(_) => "Unidentified".to_string(),
    }
}

#[cfg(not(any(target_os = "android", target_arch = "wasm32", target_os = "ios")))]
fn scancode(key: PhysicalKey) -> Option<u32> {
    use winit::platform::scancode::PhysicalKeyExtScancode;
    key.to_scancode()
}

#[cfg(any(target_os = "android", target_arch = "wasm32", target_os = "ios"))]
fn scancode(_key: PhysicalKey) -> Option<u32> {
    None
}

fn map_key_action(state: ElementState, repeat: bool) -> ButtonAction {
    match state {
        ElementState::Pressed if repeat => ButtonAction::Repeat,
        ElementState::Pressed => ButtonAction::Press,
        ElementState::Released => ButtonAction::Release,
    }
}

/// (Internal) Maps a `winit::event::MouseButton` to the engine's `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}
