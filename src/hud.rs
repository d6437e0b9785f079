//! Text overlay drawn with egui on top of the bars.

use std::time::Duration;

use egui::{Color32, RichText};
use winit::{event::WindowEvent, window::Window};

use crate::algorithms::Algorithm;
use crate::engine::Engine;
use crate::renderer::HIGHLIGHT_COLOR;

const TEXT_COLOR: Color32 = Color32::from_rgb(217, 212, 195);
const STATUS_SIZE: f32 = 20.0;
const LIST_SIZE: f32 = 18.0;
const HELP_SIZE: f32 = 14.0;

pub const HELP_TEXT: &str = "R new array | Space sort | A/D ascending/descending | B/I/S algorithm | Esc quit";

pub fn status_text(engine: &Engine) -> String {
    format!("Algorithm: {} - {}", engine.algorithm().name(), engine.active_order().label())
}

pub fn timer_text(elapsed: Duration) -> String {
    format!("Time Elapsed: {:.2}s", elapsed.as_secs_f64())
}

pub fn counters_text(engine: &Engine) -> String {
    format!("Comparisons: {}  Steps: {}", engine.comparisons(), engine.steps())
}

/// The current algorithm is listed in the bar highlight color.
pub fn list_color(algorithm: Algorithm, engine: &Engine) -> Color32 {
    if algorithm == engine.algorithm() {
        let [r, g, b] = HIGHLIGHT_COLOR;
        Color32::from_rgb(r, g, b)
    } else {
        TEXT_COLOR
    }
}

fn text(s: impl Into<String>, size: f32, color: Color32) -> RichText {
    RichText::new(s).monospace().size(size).color(color)
}

fn build(ctx: &egui::Context, engine: &Engine) {
    egui::Area::new(egui::Id::new("hud_status"))
        .fixed_pos(egui::pos2(10.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 8.0;
            ui.label(text(status_text(engine), STATUS_SIZE, TEXT_COLOR));
            ui.label(text(timer_text(engine.time_elapsed()), STATUS_SIZE, TEXT_COLOR));
            for algorithm in Algorithm::ALL {
                ui.label(text(
                    format!("[{}] {}", algorithm.hotkey(), algorithm.name()),
                    LIST_SIZE,
                    list_color(algorithm, engine),
                ));
            }
        });

    egui::Area::new(egui::Id::new("hud_footer"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(text(counters_text(engine), HELP_SIZE, TEXT_COLOR));
            ui.label(text(HELP_TEXT, HELP_SIZE, TEXT_COLOR));
        });
}

pub struct Hud {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1);
        Self { ctx, state, renderer }
    }

    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) {
        let _ = self.state.on_window_event(window, event);
    }

    /// Records the overlay into `encoder` on top of `view`. Returns any extra
    /// command buffers egui needs submitted before `encoder`.
    #[allow(clippy::too_many_arguments)]
    pub fn paint(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        engine: &Engine,
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| build(ctx, engine));
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        let commands = self
            .renderer
            .update_buffers(device, queue, encoder, &paint_jobs, &screen);

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("HudPass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.renderer.render(&mut pass, &paint_jobs, &screen);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
        commands
    }
}
