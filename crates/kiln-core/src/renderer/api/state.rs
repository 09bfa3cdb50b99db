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

//! Lifecycle states of the device manager.

/// Where the device manager is in its create/run/shutdown lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Nothing has been created.
    #[default]
    Uninitialized,
    /// The graphics API instance exists.
    InstanceCreated,
    /// A logical device exists. Headless managers stop here.
    DeviceCreated,
    /// A swapchain exists but the backbuffers have not been sized yet.
    SwapchainCreated,
    /// Frames can be produced.
    Running,
    /// A resize is in progress; framebuffers are not available.
    Resizing,
    /// Resources are being released.
    ShuttingDown,
}

impl LifecycleState {
    /// Returns `true` once a device exists and until shutdown starts.
    pub fn has_device(self) -> bool {
        matches!(
            self,
            LifecycleState::DeviceCreated
                | LifecycleState::SwapchainCreated
                | LifecycleState::Running
                | LifecycleState::Resizing
        )
    }
}
