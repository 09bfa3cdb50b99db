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

//! Window-level events and the event pump that feeds the message loop.

use super::input::InputEvent;
use std::time::Duration;

/// A notification from the host windowing system.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// A user input event, queued for the input router.
    Input(InputEvent),
    /// The inner size of the window changed (physical pixels).
    Resized {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// The window moved. The monitor, and so the DPI scale, may have changed.
    Moved {
        /// New x position of the window.
        x: i32,
        /// New y position of the window.
        y: i32,
    },
    /// The monitor scale factor of the window changed.
    ScaleFactorChanged(f64),
    /// The window gained or lost keyboard focus.
    Focused(bool),
    /// The window became fully hidden (`true`) or visible again (`false`).
    Occluded(bool),
    /// The native window is gone; its surface can no longer be presented to.
    Destroyed,
    /// The user asked to close the window.
    CloseRequested,
}

/// Whether the message loop should keep running after a pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// Keep going.
    Continue,
    /// The platform wants the application to exit.
    Exit,
}

/// Source of platform events, polled once per message loop iteration.
pub trait PlatformEventSource {
    /// Waits up to `timeout` for events (`None` waits until at least one
    /// event arrives) and appends everything received to `events`.
    fn pump_events(&mut self, timeout: Option<Duration>, events: &mut Vec<PlatformEvent>)
        -> PumpStatus;
}
