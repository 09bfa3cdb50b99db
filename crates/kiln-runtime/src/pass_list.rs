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

//! The ordered set of render passes driven by the device manager.

use kiln_core::renderer::RenderPassHandle;
use std::rc::Rc;

/// Ordered render passes, each present at most once.
///
/// Animate and render walk the list front to back. Input dispatch walks it
/// back to front, so the pass at the back gets the first chance to consume
/// an event.
#[derive(Default)]
pub struct RenderPassList {
    passes: Vec<RenderPassHandle>,
}

/// Compares two handles by the address of the pass they point to.
#[inline]
pub fn same_pass(a: &RenderPassHandle, b: &RenderPassHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl RenderPassList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `pass` at the front, moving it if it is already registered.
    pub fn add_to_front(&mut self, pass: RenderPassHandle) {
        self.remove(&pass);
        self.passes.insert(0, pass);
    }

    /// Appends `pass` at the back, moving it if it is already registered.
    pub fn add_to_back(&mut self, pass: RenderPassHandle) {
        self.remove(&pass);
        self.passes.push(pass);
    }

    /// Unregisters `pass`. Returns `true` if it was registered.
    pub fn remove(&mut self, pass: &RenderPassHandle) -> bool {
        let before = self.passes.len();
        self.passes.retain(|p| !same_pass(p, pass));
        self.passes.len() != before
    }

    /// Returns `true` if `pass` is registered.
    pub fn contains(&self, pass: &RenderPassHandle) -> bool {
        self.passes.iter().any(|p| same_pass(p, pass))
    }

    /// Passes in animate/render order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &RenderPassHandle> {
        self.passes.iter()
    }

    /// Passes in input dispatch order.
    pub fn dispatch_order(&self) -> impl Iterator<Item = &RenderPassHandle> {
        self.passes.iter().rev()
    }

    /// Number of registered passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Returns `true` if no pass is registered.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Unregisters every pass.
    pub fn clear(&mut self) {
        self.passes.clear();
    }
}
