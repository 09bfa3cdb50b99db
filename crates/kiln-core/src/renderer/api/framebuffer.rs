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

//! Backbuffers and the framebuffers built on top of them.

use super::format::SwapchainFormat;

/// Describes one swapchain image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backbuffer {
    /// Index of the image in the swapchain.
    pub index: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Color format.
    pub format: SwapchainFormat,
    /// MSAA sample count.
    pub sample_count: u32,
    /// Opaque backend handle for the image, 0 if the backend has none.
    pub native_handle: u64,
}

/// Identifies one framebuffer build. Every rebuild allocates new ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FramebufferId(pub u64);

/// A render target wrapping one backbuffer, rebuilt whenever the swapchain
/// changes size or is recreated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Unique id of this build.
    pub id: FramebufferId,
    /// The wrapped backbuffer.
    pub backbuffer: Backbuffer,
}

impl Framebuffer {
    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.backbuffer.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.backbuffer.height
    }

    /// MSAA sample count.
    #[inline]
    pub fn sample_count(&self) -> u32 {
        self.backbuffer.sample_count
    }

    /// Index of the wrapped swapchain image.
    #[inline]
    pub fn backbuffer_index(&self) -> u32 {
        self.backbuffer.index
    }
}
