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

// Kiln Sandbox
// Main binary for testing and demos

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use kiln_sdk::prelude::*;
use kiln_sdk::{Application, Engine, EngineContext};

const TRIANGLE_WGSL: &str = r#"
struct Uniforms {
    time: f32,
    scale: f32,
    aspect: f32,
    _pad: f32,
};

@group(0) @binding(0) var<uniform> u: Uniforms;

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VsOut {
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(0.0, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
    );
    var colors = array<vec3<f32>, 3>(
        vec3<f32>(1.0, 0.0, 0.0),
        vec3<f32>(0.0, 1.0, 0.0),
        vec3<f32>(0.0, 0.0, 1.0),
    );
    let c = cos(u.time);
    let s = sin(u.time);
    let p = positions[index] * u.scale;
    let rotated = vec2<f32>(p.x * c - p.y * s, p.x * s + p.y * c);

    var out: VsOut;
    out.position = vec4<f32>(rotated.x / u.aspect, rotated.y, 0.0, 1.0);
    out.color = colors[index];
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    time: f32,
    scale: f32,
    aspect: f32,
    _pad: f32,
}

/// State the overlay edits and the scene reads.
#[derive(Debug)]
struct SharedControls {
    paused: Cell<bool>,
    scale: Cell<f32>,
}

struct GpuResources {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuResources {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        log::info!("ScenePass: Creating GPU resources for {format:?}...");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Triangle Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(TRIANGLE_WGSL)),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Triangle Uniforms Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Triangle Uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Triangle Uniforms Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Triangle Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Triangle Render Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }
}

/// Clears the backbuffer and draws a spinning triangle.
struct ScenePass {
    target: Arc<WgpuFrameTarget>,
    controls: Rc<SharedControls>,
    resources: Option<(wgpu::TextureFormat, GpuResources)>,
    time: f32,
    aspect: f32,
}

impl ScenePass {
    fn new(target: Arc<WgpuFrameTarget>, controls: Rc<SharedControls>) -> Self {
        Self {
            target,
            controls,
            resources: None,
            time: 0.0,
            aspect: 1.0,
        }
    }
}

impl RenderPass for ScenePass {
    fn animate(&mut self, elapsed_seconds: f32) {
        if !self.controls.paused.get() {
            self.time += elapsed_seconds;
        }
    }

    fn back_buffer_resized(&mut self, width: u32, height: u32, _sample_count: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    fn render(&mut self, framebuffer: &Framebuffer) {
        let uniforms = Uniforms {
            time: self.time,
            scale: self.controls.scale.get(),
            aspect: self.aspect,
            _pad: 0.0,
        };
        let resources = &mut self.resources;
        let time = self.time;

        let rendered = self.target.with_frame(|frame| {
            // Pipelines are tied to the surface format, which can change with the swapchain.
            if resources.as_ref().map(|(format, _)| *format) != Some(frame.format) {
                *resources = Some((frame.format, GpuResources::new(frame.device, frame.format)));
            }
            let Some((_, gpu)) = resources.as_ref() else {
                return;
            };
            frame
                .queue
                .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

            let mut encoder = frame
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Scene Encoder"),
                });
            {
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: 0.01,
                                g: 0.02 + 0.02 * f64::from(time.sin().abs()),
                                b: 0.03,
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                pass.set_pipeline(&gpu.pipeline);
                pass.set_bind_group(0, &gpu.bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
            frame.queue.submit(Some(encoder.finish()));
        });

        if rendered.is_none() {
            log::warn!(
                "ScenePass: no backbuffer for framebuffer {}",
                framebuffer.backbuffer_index()
            );
        }
    }
}

/// Sits in front of the scene for input: Space pauses, the wheel scales.
struct OverlayPass {
    controls: Rc<SharedControls>,
    cursor: (f64, f64),
}

impl RenderPass for OverlayPass {
    fn keyboard_update(&mut self, input: &KeyboardInput) -> bool {
        if input.key_code == "Space" && input.action == ButtonAction::Press {
            let paused = !self.controls.paused.get();
            self.controls.paused.set(paused);
            log::info!("Animation {}", if paused { "paused" } else { "resumed" });
            return true;
        }
        false
    }

    fn mouse_pos_update(&mut self, x: f64, y: f64) -> bool {
        self.cursor = (x, y);
        false
    }

    fn mouse_scroll_update(&mut self, _delta_x: f64, delta_y: f64) -> bool {
        let scale = (self.controls.scale.get() + delta_y as f32 * 0.05).clamp(0.1, 2.0);
        self.controls.scale.set(scale);
        true
    }

    fn mouse_button_update(
        &mut self,
        button: MouseButton,
        action: ButtonAction,
        _modifiers: Modifiers,
    ) -> bool {
        if action == ButtonAction::Press {
            log::info!("{button:?} click at ({:.0}, {:.0})", self.cursor.0, self.cursor.1);
        }
        false
    }
}

struct SandboxApp {
    scene: Rc<RefCell<ScenePass>>,
    overlay: Rc<RefCell<OverlayPass>>,
}

impl Application for SandboxApp {
    fn new(context: EngineContext) -> Self {
        log::info!("SandboxApp: Registering render passes...");
        let controls = Rc::new(SharedControls {
            paused: Cell::new(false),
            scale: Cell::new(1.0),
        });

        let scene = Rc::new(RefCell::new(ScenePass::new(
            context.frame_target.clone(),
            controls.clone(),
        )));
        let overlay = Rc::new(RefCell::new(OverlayPass {
            controls,
            cursor: (0.0, 0.0),
        }));

        let manager = context.device_manager;
        manager.add_render_pass_to_back(scene.clone() as RenderPassHandle);
        // Added last, so it sees input first.
        manager.add_render_pass_to_back(overlay.clone() as RenderPassHandle);

        manager.set_callback(
            PipelineStage::AfterPresent,
            Some(Box::new(|manager: &DeviceManager, frame_index: u32| {
                if frame_index % 30 == 0 {
                    let title = manager.informative_window_title("Kiln Sandbox", true, None);
                    if let Some(window) = manager.window() {
                        window.set_title(&title);
                    }
                }
            })),
        );

        Self { scene, overlay }
    }

    fn shutdown(&mut self, device_manager: &mut DeviceManager) {
        device_manager.remove_render_pass(&(self.overlay.clone() as RenderPassHandle));
        device_manager.remove_render_pass(&(self.scene.clone() as RenderPassHandle));
        log::info!("SandboxApp: Render passes removed.");
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let params = match std::env::args().nth(1) {
        Some(path) => DeviceCreationParameters::load(path)?,
        None => DeviceCreationParameters::default(),
    };

    Engine::new(params)
        .with_title("Kiln Sandbox")
        .run::<SandboxApp>()?;
    Ok(())
}
