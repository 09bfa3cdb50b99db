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

//! Routes input events to the render pass stack.
//!
//! Passes are offered an event in dispatch order (back of the list first)
//! and the first pass that consumes it stops the dispatch. Pointer positions
//! are converted to logical pixels unless explicit display scaling is on.

use crate::pass_list::RenderPassList;
use kiln_core::platform::{ControllerSource, InputEvent};
use std::collections::VecDeque;

/// Default radial dead zone applied to controller thumbsticks.
pub const DEFAULT_DEAD_ZONE: f32 = 0.1;

/// How pointer coordinates are converted before dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerScaling {
    /// Horizontal DPI scale.
    pub scale_x: f32,
    /// Vertical DPI scale.
    pub scale_y: f32,
    /// Passes handle DPI themselves; coordinates stay in physical pixels.
    pub explicit: bool,
}

impl Default for PointerScaling {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            explicit: false,
        }
    }
}

impl PointerScaling {
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        if self.explicit || self.scale_x <= 0.0 || self.scale_y <= 0.0 {
            (x, y)
        } else {
            (x / f64::from(self.scale_x), y / f64::from(self.scale_y))
        }
    }
}

/// Scales a thumbstick vector so that values inside the dead zone become
/// zero and the remaining range is stretched back to `[0, 1]`.
pub fn apply_dead_zone(x: f32, y: f32, dead_zone: f32) -> (f32, f32) {
    let length = (x * x + y * y).sqrt();
    if length <= f32::EPSILON || dead_zone >= 1.0 {
        return (0.0, 0.0);
    }
    let factor = (length - dead_zone).max(0.0) / (1.0 - dead_zone);
    (x * factor, y * factor)
}

struct ConnectedController {
    id: u32,
    buttons: Vec<bool>,
}

/// Queues platform input and dispatches it to render passes.
pub struct InputRouter {
    pending: VecDeque<InputEvent>,
    controllers: Vec<ConnectedController>,
    disconnected: Vec<u32>,
    controller_source: Option<Box<dyn ControllerSource>>,
    dead_zone: f32,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    /// Creates a router without controller support.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            controllers: Vec::new(),
            disconnected: Vec::new(),
            controller_source: None,
            dead_zone: DEFAULT_DEAD_ZONE,
        }
    }

    /// Polls `source` for connected controllers on every update.
    pub fn with_controller_source(mut self, source: Box<dyn ControllerSource>) -> Self {
        self.controller_source = Some(source);
        self
    }

    /// Changes the thumbstick dead zone.
    pub fn set_dead_zone(&mut self, dead_zone: f32) {
        self.dead_zone = dead_zone.clamp(0.0, 0.99);
    }

    /// Queues an event for the next [`InputRouter::flush`].
    pub fn queue(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Number of queued events.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Dispatches every queued event in arrival order. Returns how many were consumed.
    pub fn flush(&mut self, passes: &RenderPassList, scaling: PointerScaling) -> usize {
        let mut consumed = 0;
        while let Some(event) = self.pending.pop_front() {
            if self.dispatch(&event, passes, scaling) {
                consumed += 1;
            }
        }
        consumed
    }

    /// Offers `event` to the passes in dispatch order. Returns `true` if a
    /// pass consumed it.
    pub fn dispatch(
        &self,
        event: &InputEvent,
        passes: &RenderPassList,
        scaling: PointerScaling,
    ) -> bool {
        for pass in passes.dispatch_order() {
            let mut pass = pass.borrow_mut();
            let consumed = match event {
                InputEvent::Keyboard(input) => pass.keyboard_update(input),
                InputEvent::Character { ch, modifiers } => pass.keyboard_char_input(*ch, *modifiers),
                InputEvent::MouseMoved { x, y } => {
                    let (x, y) = scaling.apply(*x, *y);
                    pass.mouse_pos_update(x, y)
                }
                InputEvent::MouseButton {
                    button,
                    action,
                    modifiers,
                } => pass.mouse_button_update(*button, *action, *modifiers),
                InputEvent::MouseWheelScrolled { delta_x, delta_y } => {
                    pass.mouse_scroll_update(*delta_x, *delta_y)
                }
                InputEvent::ControllerButton { button, pressed } => {
                    pass.joystick_button_update(*button, *pressed)
                }
                InputEvent::ControllerAxis { axis, value } => {
                    pass.joystick_axis_update(*axis, *value)
                }
            };
            if consumed {
                return true;
            }
        }
        false
    }

    /// Registers a controller. Connecting an id twice is a no-op.
    pub fn connect_controller(&mut self, id: u32) {
        self.disconnected.retain(|d| *d != id);
        if !self.controllers.iter().any(|c| c.id == id) {
            log::info!("Controller {id} connected");
            self.controllers.push(ConnectedController {
                id,
                buttons: Vec::new(),
            });
        }
    }

    /// Marks a controller for removal at the start of the next update.
    pub fn disconnect_controller(&mut self, id: u32) {
        if !self.disconnected.contains(&id) {
            self.disconnected.push(id);
        }
    }

    /// Removes controllers marked as disconnected.
    pub fn erase_disconnected_controllers(&mut self) {
        if self.disconnected.is_empty() {
            return;
        }
        let disconnected = std::mem::take(&mut self.disconnected);
        self.controllers.retain(|c| {
            let keep = !disconnected.contains(&c.id);
            if !keep {
                log::info!("Controller {} disconnected", c.id);
            }
            keep
        });
    }

    /// Ids of the connected controllers, in connection order.
    pub fn connected_controllers(&self) -> Vec<u32> {
        self.controllers.iter().map(|c| c.id).collect()
    }

    /// Polls every connected controller and dispatches its state: axis
    /// values every call, button values when they change.
    pub fn update_controllers(&mut self, passes: &RenderPassList) {
        self.erase_disconnected_controllers();

        let Some(mut source) = self.controller_source.take() else {
            return;
        };

        let mut events = Vec::new();
        let mut lost = Vec::new();
        for controller in &mut self.controllers {
            let Some(mut state) = source.poll(controller.id) else {
                lost.push(controller.id);
                continue;
            };

            for stick in [0usize, 2] {
                if stick + 1 < state.axes.len() {
                    let (x, y) =
                        apply_dead_zone(state.axes[stick], state.axes[stick + 1], self.dead_zone);
                    state.axes[stick] = x;
                    state.axes[stick + 1] = y;
                }
            }
            for (axis, value) in state.axes.iter().enumerate() {
                events.push(InputEvent::ControllerAxis {
                    axis: axis as u32,
                    value: *value,
                });
            }

            controller.buttons.resize(state.buttons.len(), false);
            for (button, pressed) in state.buttons.iter().enumerate() {
                if controller.buttons[button] != *pressed {
                    controller.buttons[button] = *pressed;
                    events.push(InputEvent::ControllerButton {
                        button: button as u32,
                        pressed: *pressed,
                    });
                }
            }
        }
        self.controller_source = Some(source);

        for id in lost {
            self.disconnect_controller(id);
        }
        for event in &events {
            self.dispatch(event, passes, PointerScaling::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kiln_core::platform::{ButtonAction, ControllerState, KeyboardInput, Modifiers};
    use kiln_core::renderer::{RenderPass, RenderPassHandle};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        consume: bool,
        keys: Vec<String>,
        positions: Vec<(f64, f64)>,
        axes: Vec<(u32, f32)>,
        buttons: Vec<(u32, bool)>,
    }

    impl RenderPass for Recorder {
        fn keyboard_update(&mut self, input: &KeyboardInput) -> bool {
            self.keys.push(input.key_code.clone());
            self.consume
        }

        fn mouse_pos_update(&mut self, x: f64, y: f64) -> bool {
            self.positions.push((x, y));
            self.consume
        }

        fn joystick_axis_update(&mut self, axis: u32, value: f32) -> bool {
            self.axes.push((axis, value));
            self.consume
        }

        fn joystick_button_update(&mut self, button: u32, pressed: bool) -> bool {
            self.buttons.push((button, pressed));
            self.consume
        }
    }

    fn recorder(consume: bool) -> Rc<RefCell<Recorder>> {
        Rc::new(RefCell::new(Recorder {
            consume,
            ..Default::default()
        }))
    }

    fn key(code: &str) -> InputEvent {
        InputEvent::Keyboard(KeyboardInput {
            key_code: code.to_string(),
            scancode: None,
            action: ButtonAction::Press,
            modifiers: Modifiers::NONE,
        })
    }

    /// Test cases for capture semantics: the first consumer stops dispatch
    #[test]
    fn first_consumer_stops_dispatch() {
        let (p1, p2, p3) = (recorder(true), recorder(false), recorder(false));
        let mut passes = RenderPassList::new();
        // Dispatch runs from the back, so P1 is added last.
        passes.add_to_back(p3.clone() as RenderPassHandle);
        passes.add_to_back(p2.clone() as RenderPassHandle);
        passes.add_to_back(p1.clone() as RenderPassHandle);

        let router = InputRouter::new();
        assert!(router.dispatch(&key("KeyA"), &passes, PointerScaling::default()));
        assert_eq!(p1.borrow().keys, ["KeyA"]);
        assert!(p2.borrow().keys.is_empty());
        assert!(p3.borrow().keys.is_empty());

        p1.borrow_mut().consume = false;
        assert!(!router.dispatch(&key("KeyB"), &passes, PointerScaling::default()));
        assert_eq!(p2.borrow().keys, ["KeyB"], "P2 is offered the event once P1 declines");
        assert_eq!(p3.borrow().keys, ["KeyB"]);
    }

    #[test]
    fn pointer_is_divided_by_dpi_scale() {
        let pass = recorder(false);
        let mut passes = RenderPassList::new();
        passes.add_to_back(pass.clone() as RenderPassHandle);
        let router = InputRouter::new();

        let event = InputEvent::MouseMoved { x: 300.0, y: 150.0 };
        let scaled = PointerScaling {
            scale_x: 1.5,
            scale_y: 1.5,
            explicit: false,
        };
        router.dispatch(&event, &passes, scaled);
        router.dispatch(
            &event,
            &passes,
            PointerScaling {
                explicit: true,
                ..scaled
            },
        );

        let positions = &pass.borrow().positions;
        assert_relative_eq!(positions[0].0, 200.0);
        assert_relative_eq!(positions[0].1, 100.0);
        assert_eq!(positions[1], (300.0, 150.0), "Explicit scaling keeps physical pixels");
    }

    #[test]
    fn flush_drains_in_order() {
        let pass = recorder(true);
        let mut passes = RenderPassList::new();
        passes.add_to_back(pass.clone() as RenderPassHandle);

        let mut router = InputRouter::new();
        router.queue(key("KeyA"));
        router.queue(key("KeyB"));
        assert_eq!(router.pending_len(), 2);

        assert_eq!(router.flush(&passes, PointerScaling::default()), 2);
        assert_eq!(router.pending_len(), 0);
        assert_eq!(pass.borrow().keys, ["KeyA", "KeyB"]);
    }

    #[test]
    fn dead_zone_behaviour() {
        assert_eq!(apply_dead_zone(0.05, 0.05, 0.1), (0.0, 0.0));
        let (x, y) = apply_dead_zone(1.0, 0.0, 0.1);
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, 0.0);
        let (x, _) = apply_dead_zone(0.55, 0.0, 0.1);
        assert_relative_eq!(x, 0.55 * 0.5, epsilon = 1e-6);
    }

    struct ScriptedControllers {
        states: HashMap<u32, ControllerState>,
    }

    impl ControllerSource for ScriptedControllers {
        fn poll(&mut self, device_id: u32) -> Option<ControllerState> {
            self.states.get(&device_id).cloned()
        }
    }

    #[test]
    fn controllers_dispatch_axes_and_button_changes() {
        let pass = recorder(false);
        let mut passes = RenderPassList::new();
        passes.add_to_back(pass.clone() as RenderPassHandle);

        let mut states = HashMap::new();
        states.insert(
            7,
            ControllerState {
                axes: vec![0.05, 0.0],
                buttons: vec![true, false],
            },
        );
        let mut router = InputRouter::new()
            .with_controller_source(Box::new(ScriptedControllers { states }));
        router.connect_controller(7);
        router.connect_controller(9); // Not known to the source.

        router.update_controllers(&passes);
        router.update_controllers(&passes);

        let recorded = pass.borrow();
        assert_eq!(recorded.axes, [(0, 0.0), (1, 0.0), (0, 0.0), (1, 0.0)]);
        assert_eq!(recorded.buttons, [(0, true)], "Buttons dispatch only on change");
        drop(recorded);

        assert_eq!(router.connected_controllers(), [7]);
    }

    #[test]
    fn disconnect_is_deferred() {
        let mut router = InputRouter::new();
        router.connect_controller(1);
        router.connect_controller(2);
        router.disconnect_controller(1);
        assert_eq!(router.connected_controllers(), [1, 2]);

        router.erase_disconnected_controllers();
        assert_eq!(router.connected_controllers(), [2]);
    }
}
