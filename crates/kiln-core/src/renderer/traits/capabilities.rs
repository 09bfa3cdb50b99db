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

//! Optional integrations the device manager drives when they are installed.

/// Captures GPU crash dumps.
pub trait CrashDumpCapture {
    /// Starts tracking GPU state. Called while the instance is created.
    fn enable_tracking(&mut self);

    /// Blocks until a pending crash dump has been written.
    fn wait_for_crash_dump(&mut self);
}

/// Receives frame boundary markers, as used by latency reduction and frame
/// generation integrations.
pub trait FrameMarkers {
    /// Simulation for `frame_index` is done.
    fn simulation_end(&mut self, frame_index: u32);
    /// Render submission for `frame_index` starts.
    fn render_start(&mut self, frame_index: u32);
    /// Render submission for `frame_index` ended.
    fn render_end(&mut self, frame_index: u32);
    /// Presentation of `frame_index` starts.
    fn present_start(&mut self, frame_index: u32);
    /// Presentation of `frame_index` ended.
    fn present_end(&mut self, frame_index: u32);
    /// The device is being torn down.
    fn shutdown(&mut self) {}
}
