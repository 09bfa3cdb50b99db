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

//! Adapter and graphics API information.

/// PCI vendor id of NVIDIA adapters.
pub const VENDOR_ID_NVIDIA: u32 = 0x10DE;

/// The graphics API a backend drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicsApi {
    /// Vulkan.
    Vulkan,
    /// Direct3D 11.
    Dx11,
    /// Direct3D 12.
    Dx12,
    /// Apple Metal.
    Metal,
    /// OpenGL / OpenGL ES.
    OpenGl,
    /// Browser WebGPU.
    WebGpu,
    /// No real API, used by headless tests.
    #[default]
    Null,
}

impl GraphicsApi {
    /// Human-readable name, as shown in window titles.
    pub fn display_name(self) -> &'static str {
        match self {
            GraphicsApi::Vulkan => "Vulkan",
            GraphicsApi::Dx11 => "D3D11",
            GraphicsApi::Dx12 => "D3D12",
            GraphicsApi::Metal => "Metal",
            GraphicsApi::OpenGl => "OpenGL",
            GraphicsApi::WebGpu => "WebGPU",
            GraphicsApi::Null => "Null",
        }
    }
}

/// Provides standardized, backend-agnostic information about a graphics adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterInfo {
    /// The name of the adapter (e.g., "NVIDIA GeForce RTX 4090").
    pub name: String,
    /// PCI vendor id, 0 when unknown.
    pub vendor_id: u32,
    /// PCI device id, 0 when unknown.
    pub device_id: u32,
    /// Dedicated video memory in bytes, 0 when unknown.
    pub dedicated_video_memory: u64,
    /// Device UUID, when the API exposes one.
    pub uuid: Option<[u8; 16]>,
    /// Locally unique identifier, when the API exposes one.
    pub luid: Option<[u8; 8]>,
}

impl AdapterInfo {
    /// Returns `true` for NVIDIA adapters.
    pub fn is_nvidia(&self) -> bool {
        self.vendor_id == VENDOR_ID_NVIDIA
    }
}
