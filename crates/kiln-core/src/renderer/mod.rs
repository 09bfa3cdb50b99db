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

//! Provides the public, backend-agnostic device and swapchain contracts.
//!
//! The `api` module holds plain data (creation parameters, adapters,
//! backbuffers, framebuffers), `traits` holds the contracts a render pass or a
//! graphics backend implements, and `error` holds the failure types they share.
//! Concrete backends live in the `kiln-infra` crate.

pub mod api;
pub mod error;
pub mod traits;

pub use self::api::*;
pub use self::error::{ConfigError, RenderError};
pub use self::traits::{
    CrashDumpCapture, FrameAcquire, FrameMarkers, RenderPass, RenderPassHandle, SwapchainBackend,
};
