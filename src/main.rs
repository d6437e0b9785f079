use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use sort_visualizer::{
    clock::FrameClock, config::Cli, config::Config, controls::Command, engine::Engine, renderer::Renderer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Cli::parse().into_config()?;
    pollster::block_on(run(config))
}

async fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Sort Visualizer")
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .build(&event_loop)?;

    // Leak the window to satisfy the surface lifetime; acceptable for single-window app
    let window: &'static _ = Box::leak(Box::new(window));

    let mut renderer = Renderer::new(window).await?;
    let mut engine = Engine::new(&config);
    info!(size = config.size, fps = config.fps, seed = ?config.seed, "visualizer ready");

    let mut clock = FrameClock::new(config.frame_time(), Instant::now());

    Ok(event_loop.run(move |event, target| match event {
        Event::WindowEvent { event, .. } => {
            renderer.handle_window_event(&event);
            match event {
                WindowEvent::CloseRequested => target.exit(),
                WindowEvent::Resized(size) => renderer.resize(size),
                WindowEvent::ScaleFactorChanged { .. } => renderer.resize(window.inner_size()),
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state != ElementState::Pressed || event.repeat {
                        return;
                    }
                    if let PhysicalKey::Code(code) = event.physical_key {
                        if code == KeyCode::Escape {
                            target.exit();
                        } else if let Some(command) = Command::from_key(code) {
                            engine.apply(command);
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Some(dt) = clock.take_frame(Instant::now()) {
                        engine.step(dt);
                    }
                    if let Err(err) = renderer.render(&engine) {
                        error!(?err, "render failed");
                        target.exit();
                    }
                }
                _ => {}
            }
        }
        Event::AboutToWait => {
            if clock.poll(Instant::now()) {
                window.request_redraw();
            }
            target.set_control_flow(ControlFlow::WaitUntil(clock.deadline()));
        }
        _ => {}
    })?)
}
