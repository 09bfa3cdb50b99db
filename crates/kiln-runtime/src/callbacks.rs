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

//! Hooks the application can register around each stage of a tick.

use crate::device_manager::DeviceManager;

/// A hook invoked with the manager and the frame index of the stage.
pub type PipelineCallback = Box<dyn FnMut(&DeviceManager, u32)>;

/// The points of a tick where a [`PipelineCallback`] can run, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Start of a message loop iteration, before events are pumped.
    BeforeFrame,
    /// Before passes animate.
    BeforeAnimate,
    /// After passes animated.
    AfterAnimate,
    /// Before passes render.
    BeforeRender,
    /// After passes rendered.
    AfterRender,
    /// Before the backend presents.
    BeforePresent,
    /// After the backend presented.
    AfterPresent,
}

impl PipelineStage {
    /// Every stage, in call order.
    pub const ALL: [PipelineStage; 7] = [
        PipelineStage::BeforeFrame,
        PipelineStage::BeforeAnimate,
        PipelineStage::AfterAnimate,
        PipelineStage::BeforeRender,
        PipelineStage::AfterRender,
        PipelineStage::BeforePresent,
        PipelineStage::AfterPresent,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// One optional hook per stage.
#[derive(Default)]
pub(crate) struct PipelineCallbacks {
    slots: [Option<PipelineCallback>; 7],
}

impl PipelineCallbacks {
    pub(crate) fn set(&mut self, stage: PipelineStage, callback: Option<PipelineCallback>) {
        self.slots[stage.slot()] = callback;
    }

    pub(crate) fn is_set(&self, stage: PipelineStage) -> bool {
        self.slots[stage.slot()].is_some()
    }

    /// Takes the hook out so it can be called with the manager borrowed.
    pub(crate) fn take(&mut self, stage: PipelineStage) -> Option<PipelineCallback> {
        self.slots[stage.slot()].take()
    }

    /// Puts a taken hook back unless a new one was registered meanwhile.
    pub(crate) fn restore(&mut self, stage: PipelineStage, callback: PipelineCallback) {
        let slot = &mut self.slots[stage.slot()];
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}
