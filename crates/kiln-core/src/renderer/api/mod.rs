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

//! Plain data types shared between the device manager and its backends.

pub mod adapter;
pub mod format;
pub mod framebuffer;
pub mod params;
pub mod state;

pub use self::adapter::{AdapterInfo, GraphicsApi};
pub use self::format::SwapchainFormat;
pub use self::framebuffer::{Backbuffer, Framebuffer, FramebufferId};
pub use self::params::{DeviceCreationParameters, InstanceParameters, WindowStartMode};
pub use self::state::LifecycleState;
