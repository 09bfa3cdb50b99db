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

mod common;

use common::*;
use kiln_core::renderer::{
    DeviceCreationParameters, InstanceParameters, LifecycleState, RenderError, RenderPassHandle,
};
use kiln_runtime::DeviceManager;
use std::cell::RefCell;
use std::rc::Rc;

fn manager_with(buffer_count: u32) -> (DeviceManager, EventLog, Rc<RefCell<MockState>>) {
    let log = new_log();
    let (backend, state) = MockBackend::new(log.clone(), buffer_count);
    (DeviceManager::new(Box::new(backend)), log, state)
}

#[test]
fn test_first_resize_builds_one_framebuffer_per_backbuffer() {
    // --- 1. ARRANGE ---
    let (mut manager, log, _state) = manager_with(3);
    let passes = [
        RecordingPass::new("a", log.clone()),
        RecordingPass::new("b", log.clone()),
    ];
    for pass in &passes {
        manager.add_render_pass_to_back(pass.clone() as RenderPassHandle);
    }
    let params = DeviceCreationParameters {
        back_buffer_width: 1280,
        back_buffer_height: 720,
        swapchain_buffer_count: 3,
        ..Default::default()
    };
    let window = MockWindow::new(1280, 720);

    // --- 2. ACT ---
    manager
        .create_window_device_and_swapchain(params, window.clone(), "Lifecycle")
        .expect("Creation should succeed");

    // --- 3. ASSERT ---
    assert_eq!(manager.state(), LifecycleState::Running);
    assert_eq!(manager.framebuffer_count(), 3, "One framebuffer per backbuffer");
    for pass in ["a", "b"] {
        assert_eq!(
            entries(&log, &format!("{pass}:resized")),
            vec![format!("{pass}:resized 1280x720@1")],
            "Each pass is told about the size exactly once"
        );
    }
    assert_eq!(manager.window_dimensions(), (1280, 720));
    assert_eq!(window.title(), "Lifecycle");
    assert!(manager.is_window_visible());
}

#[test]
fn test_creation_runs_layers_in_order() {
    let (mut manager, log, _state) = manager_with(2);
    manager
        .create_window_device_and_swapchain(
            DeviceCreationParameters::default(),
            MockWindow::new(800, 600),
            "Order",
        )
        .unwrap();

    let backend_calls = entries(&log, "backend:");
    assert_eq!(
        backend_calls,
        [
            "backend:create_instance",
            "backend:create_device",
            "backend:create_swapchain",
            "backend:resize 800x600",
        ]
    );
}

#[test]
fn test_create_instance_is_idempotent() {
    let (mut manager, log, _state) = manager_with(2);
    let params = InstanceParameters::default();

    manager.create_instance(&params).unwrap();
    manager.create_instance(&params).unwrap();

    assert_eq!(entries(&log, "backend:create_instance").len(), 1);
    assert_eq!(manager.state(), LifecycleState::InstanceCreated);
}

#[test]
fn test_instance_failure_leaves_nothing_created() {
    let (mut manager, log, state) = manager_with(2);
    state.borrow_mut().fail_instance = true;

    let result = manager.create_window_device_and_swapchain(
        DeviceCreationParameters::default(),
        MockWindow::new(640, 480),
        "Fail",
    );

    assert!(matches!(result, Err(RenderError::InstanceCreationFailed(_))));
    assert_eq!(manager.state(), LifecycleState::Uninitialized);
    assert!(entries(&log, "backend:create_device").is_empty());
}

#[test]
fn test_device_failure_keeps_instance() {
    let (mut manager, log, state) = manager_with(2);
    state.borrow_mut().fail_device = true;

    let result = manager.create_headless_device(DeviceCreationParameters::default());
    assert!(matches!(result, Err(RenderError::DeviceCreationFailed(_))));
    assert_eq!(manager.state(), LifecycleState::InstanceCreated);

    // Retrying reuses the instance.
    state.borrow_mut().fail_device = false;
    manager
        .create_headless_device(DeviceCreationParameters::default())
        .unwrap();
    assert_eq!(manager.state(), LifecycleState::DeviceCreated);
    assert_eq!(entries(&log, "backend:create_instance").len(), 1);
    assert!(manager.device_params().instance.headless_device);
}

#[test]
fn test_swapchain_failure_keeps_device_and_allows_retry() {
    let (mut manager, log, state) = manager_with(2);
    state.borrow_mut().fail_swapchain = true;
    let window = MockWindow::new(640, 480);

    let result = manager.create_window_device_and_swapchain(
        DeviceCreationParameters::default(),
        window.clone(),
        "Retry",
    );
    assert!(matches!(result, Err(RenderError::SwapchainCreationFailed(_))));
    assert_eq!(manager.state(), LifecycleState::DeviceCreated);
    assert!(manager.window().is_none(), "No window is kept for a failed swapchain");

    state.borrow_mut().fail_swapchain = false;
    manager
        .create_window_device_and_swapchain(DeviceCreationParameters::default(), window, "Retry")
        .unwrap();
    assert_eq!(manager.state(), LifecycleState::Running);
    assert_eq!(entries(&log, "backend:create_device").len(), 1);
}

#[test]
fn test_adapter_index_out_of_range() {
    let (mut manager, _log, _state) = manager_with(2);
    let params = DeviceCreationParameters {
        adapter_index: 4,
        ..Default::default()
    };

    let result = manager.create_headless_device(params);
    match result {
        Err(RenderError::AdapterNotFound { index, available }) => {
            assert_eq!(index, 4);
            assert_eq!(available, 1);
        }
        other => panic!("Expected AdapterNotFound, got {other:?}"),
    }
}

#[test]
fn test_enumerate_adapters_requires_instance() {
    let (mut manager, _log, _state) = manager_with(2);
    assert!(matches!(
        manager.enumerate_adapters(),
        Err(RenderError::NotInitialized)
    ));

    manager.create_instance(&InstanceParameters::default()).unwrap();
    let adapters = manager.enumerate_adapters().unwrap();
    assert_eq!(adapters.len(), 1);
    assert!(adapters[0].is_nvidia());
}

#[test]
fn test_minimized_window_at_creation_is_not_visible() {
    let (mut manager, log, _state) = manager_with(2);
    let window = MockWindow::new(0, 0);

    manager
        .create_window_device_and_swapchain(DeviceCreationParameters::default(), window, "Min")
        .unwrap();

    assert_eq!(manager.state(), LifecycleState::SwapchainCreated);
    assert!(!manager.is_window_visible());
    assert_eq!(manager.framebuffer_count(), 0);
    assert!(entries(&log, "backend:resize").is_empty());
}

#[test]
fn test_pass_added_while_running_gets_current_size() {
    let (mut manager, log, _state) = manager_with(2);
    manager
        .create_window_device_and_swapchain(
            DeviceCreationParameters::default(),
            MockWindow::new(1024, 768),
            "Late",
        )
        .unwrap();

    let late = RecordingPass::new("late", log.clone());
    manager.add_render_pass_to_front(late.clone() as RenderPassHandle);

    assert_eq!(
        entries(&log, "late:"),
        ["late:resizing", "late:resized 1024x768@1"]
    );
    assert_eq!(late.borrow().known_size, Some((1024, 768)));
}

#[test]
fn test_shutdown_releases_everything() {
    let log = new_log();
    let (backend, state) = MockBackend::new(log.clone(), 2);
    let mut manager = DeviceManager::new(Box::new(backend));
    let params = DeviceCreationParameters {
        instance: InstanceParameters {
            enable_debug_runtime: true,
            ..Default::default()
        },
        ..Default::default()
    };
    manager
        .create_window_device_and_swapchain(params, MockWindow::new(320, 240), "Bye")
        .unwrap();

    manager.shutdown();

    assert_eq!(manager.state(), LifecycleState::Uninitialized);
    assert_eq!(manager.framebuffer_count(), 0);
    assert!(manager.framebuffer(0).is_none());
    assert!(manager.window().is_none());
    assert!(!state.borrow().has_device);
    assert_eq!(
        entries(&log, "backend:").last().map(String::as_str),
        Some("backend:report_live_objects")
    );

    // The instance can be created again after shutdown.
    manager.create_instance(&InstanceParameters::default()).unwrap();
    assert_eq!(entries(&log, "backend:create_instance").len(), 2);
}

#[test]
fn test_drop_shuts_down() {
    let log = new_log();
    let (backend, _state) = MockBackend::new(log.clone(), 2);
    {
        let mut manager = DeviceManager::new(Box::new(backend));
        manager
            .create_headless_device(DeviceCreationParameters::default())
            .unwrap();
    }
    assert_eq!(entries(&log, "backend:destroy").len(), 1);
}

#[test]
fn test_creating_twice_is_rejected() {
    let (mut manager, _log, _state) = manager_with(2);
    let window = MockWindow::new(640, 480);
    manager
        .create_window_device_and_swapchain(DeviceCreationParameters::default(), window.clone(), "A")
        .unwrap();

    let again =
        manager.create_window_device_and_swapchain(DeviceCreationParameters::default(), window, "B");
    assert!(matches!(again, Err(RenderError::InvalidState { .. })));
}
