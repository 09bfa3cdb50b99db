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

//! Provides abstractions over platform-specific functionalities.
//!
//! This module contains the traits and types the device manager uses to talk
//! to the host windowing system: the window itself, the event pump that
//! drives the message loop, and the engine's input event vocabulary.

pub mod event;
pub mod input;
pub mod window;

pub use event::{PlatformEvent, PlatformEventSource, PumpStatus};
pub use input::{
    ButtonAction, ControllerSource, ControllerState, InputEvent, KeyboardInput, Modifiers,
    MouseButton,
};
pub use window::{KilnWindow, KilnWindowHandle, WindowHandle};
