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

//! Swapchain color formats.

use serde::{Deserialize, Serialize};

/// Color formats a swapchain can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SwapchainFormat {
    /// 8-bit RGBA, linear.
    Rgba8Unorm,
    /// 8-bit RGBA, sRGB encoded.
    #[default]
    Srgba8Unorm,
    /// 8-bit BGRA, linear.
    Bgra8Unorm,
    /// 8-bit BGRA, sRGB encoded.
    Sbgra8Unorm,
    /// 10-bit RGB with 2-bit alpha.
    Rgb10a2Unorm,
    /// 16-bit float RGBA, for HDR output.
    Rgba16Float,
}

impl SwapchainFormat {
    /// Bits per channel as `(red, green, blue, alpha)`.
    pub fn channel_bits(self) -> (u8, u8, u8, u8) {
        match self {
            SwapchainFormat::Rgba8Unorm
            | SwapchainFormat::Srgba8Unorm
            | SwapchainFormat::Bgra8Unorm
            | SwapchainFormat::Sbgra8Unorm => (8, 8, 8, 8),
            SwapchainFormat::Rgb10a2Unorm => (10, 10, 10, 2),
            SwapchainFormat::Rgba16Float => (16, 16, 16, 16),
        }
    }

    /// Returns `true` if the format applies sRGB encoding on write.
    pub fn is_srgb(self) -> bool {
        matches!(
            self,
            SwapchainFormat::Srgba8Unorm | SwapchainFormat::Sbgra8Unorm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bits_and_srgb() {
        assert_eq!(SwapchainFormat::Rgb10a2Unorm.channel_bits(), (10, 10, 10, 2));
        assert!(SwapchainFormat::default().is_srgb());
        assert!(!SwapchainFormat::Rgba16Float.is_srgb());
    }
}
