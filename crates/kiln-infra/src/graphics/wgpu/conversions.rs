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

use kiln_core::renderer::{GraphicsApi, SwapchainFormat};

/// A local extension trait to convert engine types into `wgpu` types.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_wgpu()` syntax.
pub trait IntoWgpu<T> {
    /// Consumes self and converts it into a `wgpu`-compatible type.
    fn into_wgpu(self) -> T;
}

impl IntoWgpu<wgpu::TextureFormat> for SwapchainFormat {
    fn into_wgpu(self) -> wgpu::TextureFormat {
        match self {
            SwapchainFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            SwapchainFormat::Srgba8Unorm => wgpu::TextureFormat::Rgba8UnormSrgb,
            SwapchainFormat::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
            SwapchainFormat::Sbgra8Unorm => wgpu::TextureFormat::Bgra8UnormSrgb,
            SwapchainFormat::Rgb10a2Unorm => wgpu::TextureFormat::Rgb10a2Unorm,
            SwapchainFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
        }
    }
}

/// Maps a surface format back to the engine's format, if it is one the
/// engine can describe.
pub fn swapchain_format_from_wgpu(format: wgpu::TextureFormat) -> Option<SwapchainFormat> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm => Some(SwapchainFormat::Rgba8Unorm),
        wgpu::TextureFormat::Rgba8UnormSrgb => Some(SwapchainFormat::Srgba8Unorm),
        wgpu::TextureFormat::Bgra8Unorm => Some(SwapchainFormat::Bgra8Unorm),
        wgpu::TextureFormat::Bgra8UnormSrgb => Some(SwapchainFormat::Sbgra8Unorm),
        wgpu::TextureFormat::Rgb10a2Unorm => Some(SwapchainFormat::Rgb10a2Unorm),
        wgpu::TextureFormat::Rgba16Float => Some(SwapchainFormat::Rgba16Float),
        _ => None,
    }
}

/// Converts a `wgpu` backend to the engine's [`GraphicsApi`].
pub fn graphics_api_from_backend(backend: wgpu::Backend) -> GraphicsApi {
    match backend {
        wgpu::Backend::Vulkan => GraphicsApi::Vulkan,
        wgpu::Backend::Dx12 => GraphicsApi::Dx12,
        wgpu::Backend::Metal => GraphicsApi::Metal,
        wgpu::Backend::Gl => GraphicsApi::OpenGl,
        wgpu::Backend::BrowserWebGpu => GraphicsApi::WebGpu,
        wgpu::Backend::Noop => GraphicsApi::Null,
        #[allow(unreachable_patterns)]
        _ => GraphicsApi::Null,
    }
}

/// Picks the surface format: the requested one if the surface supports it,
/// otherwise the first sRGB format, otherwise whatever comes first.
pub(crate) fn choose_surface_format(
    requested: SwapchainFormat,
    supported: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    let requested: wgpu::TextureFormat = requested.into_wgpu();
    if supported.contains(&requested) {
        return Some(requested);
    }
    supported
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| supported.first().copied())
}

/// Picks a present mode for the vsync setting. `Fifo` is always supported.
pub(crate) fn choose_present_mode(
    vsync: bool,
    supported: &[wgpu::PresentMode],
) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
        .into_iter()
        .find(|mode| supported.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_conversion_is_reversible() {
        for format in [
            SwapchainFormat::Rgba8Unorm,
            SwapchainFormat::Srgba8Unorm,
            SwapchainFormat::Bgra8Unorm,
            SwapchainFormat::Sbgra8Unorm,
            SwapchainFormat::Rgb10a2Unorm,
            SwapchainFormat::Rgba16Float,
        ] {
            assert_eq!(swapchain_format_from_wgpu(format.into_wgpu()), Some(format));
        }
        assert_eq!(
            swapchain_format_from_wgpu(wgpu::TextureFormat::Depth32Float),
            None
        );
    }

    #[test]
    fn test_backend_to_graphics_api() {
        assert_eq!(graphics_api_from_backend(wgpu::Backend::Vulkan), GraphicsApi::Vulkan);
        assert_eq!(graphics_api_from_backend(wgpu::Backend::Dx12), GraphicsApi::Dx12);
        assert_eq!(graphics_api_from_backend(wgpu::Backend::Gl), GraphicsApi::OpenGl);
        assert_eq!(graphics_api_from_backend(wgpu::Backend::Noop), GraphicsApi::Null);
    }

    #[test]
    fn test_surface_format_prefers_requested_then_srgb() {
        let supported = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            choose_surface_format(SwapchainFormat::Bgra8Unorm, &supported),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
        assert_eq!(
            choose_surface_format(SwapchainFormat::Rgba16Float, &supported),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
        assert_eq!(choose_surface_format(SwapchainFormat::Rgba8Unorm, &[]), None);
    }

    #[test]
    fn test_present_mode_follows_vsync() {
        let all = [
            wgpu::PresentMode::Fifo,
            wgpu::PresentMode::Mailbox,
            wgpu::PresentMode::Immediate,
        ];
        assert_eq!(choose_present_mode(true, &all), wgpu::PresentMode::Fifo);
        assert_eq!(choose_present_mode(false, &all), wgpu::PresentMode::Immediate);
        assert_eq!(
            choose_present_mode(false, &[wgpu::PresentMode::Fifo]),
            wgpu::PresentMode::Fifo
        );
    }
}
