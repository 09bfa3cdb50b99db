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

//! # Kiln Runtime
//!
//! The device manager: owns a [`SwapchainBackend`](kiln_core::renderer::SwapchainBackend),
//! the ordered list of render passes and the input router, and drives the
//! animate, render and present pipeline once per tick.

#![warn(missing_docs)]

pub mod callbacks;
pub mod device_manager;
pub mod input_router;
pub mod pass_list;

pub use callbacks::{PipelineCallback, PipelineStage};
pub use device_manager::{DeviceManager, DeviceManagerBuilder};
pub use input_router::InputRouter;
pub use pass_list::RenderPassList;
