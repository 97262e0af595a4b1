//! Platform layer: window, event loop and the per-frame callback.
//!
//! Input events are queued as they arrive and applied by the orchestrator at
//! the start of the next redraw. Redraws are requested continuously.

pub mod config;
pub mod input;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use asset::{primitives, texture::TextureData};
use corelib::{FrameClock, InputQueue, OrbitCamera, Scene};
use renderer::{FrameOrchestrator, FrameSettings, GpuState, RenderError};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

pub use config::RunConfig;
use input::PointerTracker;

const WINDOW_TITLE: &str = "Orbitview";
/// Seconds between FPS title refreshes.
const FPS_TITLE_INTERVAL: f32 = 0.5;
const UV_GRID_SIZE: u32 = 256;
const SPHERE_STACKS: u32 = 32;
const SPHERE_SLICES: u32 = 48;

/// Open the viewer window and render until it is closed.
/// Returns the fatal error that stopped the loop, if any.
pub fn run_with_renderer(config: RunConfig) -> Result<()> {
    let camera = OrbitCamera::new(config.orbit).context("Invalid orbit settings")?;
    let settings = FrameSettings {
        projection: config.projection,
        ..FrameSettings::default()
    };

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp {
        frames: FrameOrchestrator::new(camera, FrameClock::new(), settings),
        config,
        window: None,
        gpu: None,
        scene: Scene::new(),
        input: InputQueue::new(),
        pointer: PointerTracker::new(),
        last_title_update: 0.0,
        fatal: None,
    };

    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct ViewerApp {
    config: RunConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    scene: Scene,
    frames: FrameOrchestrator,
    input: InputQueue,
    pointer: PointerTracker,
    last_title_update: f32,
    fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let mut gpu = pollster::block_on(GpuState::new(window.clone(), self.config.backends))?;

        let ground = gpu.upload_mesh(&primitives::quad())?;
        let sphere = gpu.upload_mesh(&primitives::uv_sphere(SPHERE_STACKS, SPHERE_SLICES))?;
        let texture = gpu.upload_texture(&self.load_texture())?;
        self.scene = Scene::reference(ground, sphere, texture);
        log::info!(
            "Scene ready: {} opaque, {} translucent objects",
            self.scene.opaque.len(),
            self.scene.translucent.len()
        );

        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    fn load_texture(&self) -> TextureData {
        let Some(path) = &self.config.texture else {
            return TextureData::uv_grid(UV_GRID_SIZE);
        };
        match TextureData::load_png(path) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("{err:#}; falling back to the UV grid");
                TextureData::uv_grid(UV_GRID_SIZE)
            }
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        match self.frames.render_frame(gpu, &self.scene, &mut self.input) {
            Ok(outcome) => log::trace!("Frame {}: {outcome:?}", self.frames.clock().frame_count()),
            Err(RenderError::SurfaceLost) => {
                log::warn!("Surface lost, reconfiguring");
                gpu.recreate_surface();
            }
            Err(RenderError::Surface(wgpu::SurfaceError::Timeout)) => {
                log::warn!("Surface timeout, dropping frame");
            }
            Err(err) => {
                self.fail(event_loop, anyhow::Error::new(err).context("Frame render failed"));
                return;
            }
        }

        if self.config.show_fps {
            self.update_fps_title();
        }
    }

    fn update_fps_title(&mut self) {
        let clock = self.frames.clock();
        let now = clock.seconds_elapsed_since_start();
        if now - self.last_title_update < FPS_TITLE_INTERVAL {
            return;
        }
        self.last_title_update = now;
        if let Some(window) = &self.window {
            window.set_title(&format!("{WINDOW_TITLE} | {:.0} fps", clock.fps()));
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(input) = self.pointer.translate(&event) {
            self.input.push(input);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::info!("Scale factor changed: {scale_factor:.3}");
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
