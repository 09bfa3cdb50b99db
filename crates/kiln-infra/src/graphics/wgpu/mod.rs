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

//! A `wgpu` implementation of [`SwapchainBackend`](kiln_core::renderer::SwapchainBackend).
//!
//! `wgpu` hides the native swapchain images, so the backend exposes
//! `swapchain_buffer_count` virtual backbuffers and rotates through them on
//! every acquire. Render passes reach the device, queue and acquired texture
//! view through the shared [`WgpuFrameTarget`].

mod adapters;
mod context;
mod conversions;
mod frame_target;
mod swapchain;

pub use adapters::{adapter_info, backend_name, WgpuAdapterSelector};
pub use conversions::{graphics_api_from_backend, swapchain_format_from_wgpu, IntoWgpu};
pub use frame_target::{WgpuFrame, WgpuFrameTarget};
pub use swapchain::WgpuSwapchainBackend;
