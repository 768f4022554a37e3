//! Opens one window and draws a batch of generated rectangles into it.
//!
//! The window only exists to provide the rendering context; the rectangles are
//! generated and uploaded once per canvas size, and later redraws repaint the
//! same buffers.

use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use confetti_engine::coords::Viewport;
use confetti_engine::device::{Gpu, GpuInit};
use confetti_engine::logging::{LoggingConfig, init_logging};
use confetti_engine::render::{
    PreparedScene, RenderCtx, RenderTarget, SceneConfig, draw_generated_rectangles,
};

/// Window configuration.
#[derive(Debug, Clone)]
struct HostConfig {
    title: String,
    initial_size: LogicalSize<f64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "confetti: generated rectangles".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

struct Studio {
    host: HostConfig,
    gpu_init: GpuInit,
    scene_config: SceneConfig,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    scene: Option<PreparedScene>,

    /// Setup error that should make the process exit non-zero.
    failure: Option<anyhow::Error>,
}

impl Studio {
    fn new(host: HostConfig, gpu_init: GpuInit, scene_config: SceneConfig) -> Self {
        Self {
            host,
            gpu_init,
            scene_config,
            window: None,
            gpu: None,
            scene: None,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attrs = Window::default_attributes()
            .with_title(self.host.title.clone())
            .with_inner_size(self.host.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        Ok(Arc::new(window))
    }

    /// Paints one frame. Returns `false` when the host should exit.
    fn redraw(&mut self) -> bool {
        let Some(gpu) = self.gpu.as_ref() else {
            return true;
        };

        let mut frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("surface error: {err}");
                return !gpu.handle_surface_error(err).is_fatal();
            }
        };

        match self.scene.as_ref() {
            Some(scene) => {
                scene.encode(&mut RenderTarget::new(&mut frame.encoder, &frame.view));
            }
            None => {
                let size = gpu.size();
                let ctx = RenderCtx::new(
                    gpu.device(),
                    gpu.queue(),
                    gpu.surface_format(),
                    Viewport::from_physical(size.width, size.height),
                );
                let mut rng = self.scene_config.rng();
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);

                match draw_generated_rectangles(Some((&ctx, &mut target)), &self.scene_config, &mut rng) {
                    Ok(scene) => self.scene = scene,
                    Err(err) => {
                        self.failure = Some(anyhow::Error::new(err).context("shader setup failed"));
                        return false;
                    }
                }
            }
        }

        if let Some(window) = self.window.as_ref() {
            window.pre_present_notify();
        }
        gpu.submit(frame);
        true
    }
}

impl ApplicationHandler for Studio {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(w) => w,
            Err(e) => {
                self.failure = Some(e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(Gpu::new(window.clone(), self.gpu_init.clone())) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                // No rendering context: nothing to draw, not an error.
                log::warn!("no rendering context available: {e:#}");
                event_loop.exit();
                return;
            }
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                let Some(gpu) = self.gpu.as_mut() else {
                    return;
                };
                if gpu.resize(new_size) {
                    // Rectangles are laid out in pixels of the old canvas.
                    log::debug!("canvas resized to {}x{}; regenerating", new_size.width, new_size.height);
                    self.scene = None;
                    if let Some(window) = self.window.as_ref() {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if !self.redraw() {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut studio = Studio::new(HostConfig::default(), GpuInit::default(), SceneConfig::default());

    event_loop
        .run_app(&mut studio)
        .context("winit event loop terminated with error")?;

    match studio.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
