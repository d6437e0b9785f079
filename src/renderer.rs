use std::mem;

use anyhow::Result;
use glam::Mat4;
use tracing::{info, warn};
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, event::WindowEvent, window::Window};

use crate::engine::{Bar, Engine};
use crate::hud::Hud;

pub const BACKGROUND_COLOR: [u8; 3] = [30, 30, 30];
pub const HIGHLIGHT_COLOR: [u8; 3] = [212, 169, 121];

// Scene layout in logical pixels
const SIDE_MARGIN: f32 = 50.0;
const BOTTOM_MARGIN: f32 = 100.0;
// Vertical space kept free for the HUD above and the margin below
const RESERVED_HEIGHT: f32 = 150.0;
const BAR_GAP: f32 = 2.0;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BarVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Instance {
    rect: [f32; 4],
    color: [f32; 3],
    state: u32,
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    highlight: [f32; 4],
}

fn unit_rgb(color: [u8; 3]) -> [f32; 3] {
    color.map(|c| c as f32 / 255.0)
}

/// Place bars along the bottom of a `width` x `height` view. Bars stand on a
/// baseline `BOTTOM_MARGIN` above the bottom edge; a bar of `max_value` is
/// `height - RESERVED_HEIGHT` tall, leaving its top 50px below the view's top.
fn layout_bars(bars: &[Bar], max_value: u32, width: f32, height: f32) -> Vec<Instance> {
    if bars.is_empty() {
        return Vec::new();
    }
    let slot = (width - 2.0 * SIDE_MARGIN).max(0.0) / bars.len() as f32;
    let unit = (height - RESERVED_HEIGHT).max(0.0) / max_value.max(1) as f32;
    let baseline = height - BOTTOM_MARGIN;

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let h = bar.value as f32 * unit;
            Instance {
                rect: [SIDE_MARGIN + i as f32 * slot, baseline - h, (slot - BAR_GAP).max(1.0), h],
                color: unit_rgb(bar.color),
                state: bar.state.shader_id(),
            }
        })
        .collect()
}

pub struct Renderer<'a> {
    window: &'a Window,
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,

    bar_pipeline: wgpu::RenderPipeline,
    bar_vertex_buffer: wgpu::Buffer,
    bar_index_buffer: wgpu::Buffer,
    bar_index_count: u32,
    instance_buffer: wgpu::Buffer,
    globals_buffer: wgpu::Buffer,
    globals_bind: wgpu::BindGroup,

    hud: Hud,
}

impl<'a> Renderer<'a> {
    pub async fn new(window: &'a Window) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No suitable GPU adapters found"))?;
        info!(adapter = ?adapter.get_info().name, "using GPU adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                },
                None,
            )
            .await?;

        // Colors are authored in sRGB and egui expects a non-sRGB target, so
        // write them through unchanged.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Unit quad, scaled per instance
        let bar_vertices = [
            BarVertex { position: [0.0, 0.0], uv: [0.0, 0.0] },
            BarVertex { position: [1.0, 0.0], uv: [1.0, 0.0] },
            BarVertex { position: [1.0, 1.0], uv: [1.0, 1.0] },
            BarVertex { position: [0.0, 1.0], uv: [0.0, 1.0] },
        ];
        let bar_indices: [u16; 6] = [0, 1, 2, 0, 2, 3];
        let bar_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("BarVertexBuffer"),
            contents: bytemuck::cast_slice(&bar_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let bar_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("BarIndexBuffer"),
            contents: bytemuck::cast_slice(&bar_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("InstanceBuffer"),
            size: 256 * mem::size_of::<Instance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals"),
            size: mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("GlobalsLayout"),
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

        let globals_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("GlobalsBindGroup"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let bar_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("BarShader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("bar.wgsl").into()),
        });

        let bar_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("BarPipelineLayout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });
        let bar_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("BarPipeline"),
            layout: Some(&bar_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &bar_shader,
                entry_point: "vs_main",
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: mem::size_of::<BarVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: mem::size_of::<Instance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x3, 4 => Uint32],
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &bar_shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let hud = Hud::new(window, &device, surface_format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            bar_pipeline,
            bar_vertex_buffer,
            bar_index_buffer,
            bar_index_count: bar_indices.len() as u32,
            instance_buffer,
            globals_buffer,
            globals_bind,
            hud,
        })
    }

    /// Forward window input to the HUD (scale factor, focus, pointer).
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        self.hud.on_window_event(self.window, event);
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.size = size;
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, engine: &Engine) -> Result<()> {
        let (bars, max_value) = engine.bars();
        let scale = self.window.scale_factor() as f32;
        let width = self.size.width as f32 / scale;
        let height = self.size.height as f32 / scale;

        let instances = layout_bars(bars, max_value, width, height);
        let required_bytes = instances.len() as u64 * mem::size_of::<Instance>() as u64;
        if required_bytes > self.instance_buffer.size() {
            self.instance_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("InstanceBufferDynamic"),
                size: required_bytes.next_power_of_two(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let [r, g, b] = unit_rgb(HIGHLIGHT_COLOR);
        let globals = Globals {
            // y grows downwards, origin at the top-left corner
            view_proj: Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0).to_cols_array_2d(),
            highlight: [r, g, b, 1.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let output = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                warn!("surface lost, reconfiguring");
                self.resize(self.size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(anyhow::anyhow!("Surface out of memory"));
            }
            Err(err) => {
                warn!(?err, "skipping frame");
                return Ok(());
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("FrameEncoder") });

        {
            let [r, g, b] = unit_rgb(BACKGROUND_COLOR);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("BarsPass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !instances.is_empty() {
                render_pass.set_pipeline(&self.bar_pipeline);
                render_pass.set_bind_group(0, &self.globals_bind, &[]);
                render_pass.set_vertex_buffer(0, self.bar_vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass.set_index_buffer(self.bar_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..self.bar_index_count, 0, 0..instances.len() as u32);
            }
        }

        let hud_commands = self.hud.paint(
            self.window,
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            [self.config.width, self.config.height],
            engine,
        );

        self.queue
            .submit(hud_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
        Ok(())
    }
}
