//! Window creation and event handling via winit.
//!
//! [`GeodeApp`] implements winit's [`ApplicationHandler`]: it creates the
//! window and GPU resources on `resumed`, feeds key presses to the scene, and
//! renders a frame on every redraw request.

use std::sync::Arc;

use geode_config::Config;
use geode_input::{InputCommand, InputHandler, KeyBindings};
use geode_render::{
    RenderContext, SphereRenderer, SurfaceError, TextureImage, init_render_context_blocking,
};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::render_loop::{LoopState, RenderLoop, StopFlag};
use crate::setup::{self, SetupError};

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

struct Gpu {
    window: Arc<Window>,
    context: RenderContext,
    renderer: SphereRenderer,
}

/// Application state for one viewer window.
pub struct GeodeApp {
    config: Config,
    texture: TextureImage,
    render_loop: RenderLoop,
    input: InputHandler,
    gpu: Option<Gpu>,
    setup_error: Option<SetupError>,
}

impl GeodeApp {
    pub fn new(config: Config, texture: TextureImage) -> Self {
        let bindings = KeyBindings::with_overrides(&config.input.keybindings);
        let input = InputHandler::new(bindings, setup::orbit_step(&config.camera));
        let render_loop = RenderLoop::new(setup::scene_from_config(&config), StopFlag::new());
        Self {
            config,
            texture,
            render_loop,
            input,
            gpu: None,
            setup_error: None,
        }
    }

    pub fn stop_flag(&self) -> StopFlag {
        self.render_loop.stop_flag().clone()
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    fn initialize(&self, event_loop: &ActiveEventLoop) -> Result<Gpu, SetupError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let context = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let (width, height) = context.size();
        let renderer = SphereRenderer::new(
            &context.device,
            &context.queue,
            context.surface_format,
            width,
            height,
            &self.texture,
            self.config.texture.tint,
            setup::clear_color(&self.config.render),
        )?;
        info!(width, height, format = ?context.surface_format, "Renderer initialized");
        Ok(Gpu {
            window,
            context,
            renderer,
        })
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop, command: InputCommand) {
        match command {
            InputCommand::Scene(command) => match &mut self.gpu {
                Some(gpu) => {
                    let mut device = gpu.renderer.frame(&gpu.context);
                    self.render_loop.handle_command(command, &mut device);
                }
                None => {
                    self.render_loop.apply_without_device(command);
                }
            },
            InputCommand::Quit => {
                info!("Quit requested");
                self.render_loop.stop_flag().raise();
                event_loop.exit();
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let mut device = gpu.renderer.frame(&gpu.context);
        match self.render_loop.run_frame(&mut device, gpu.window.as_ref()) {
            Ok(_) => {}
            Err(SurfaceError::Timeout) => warn!("Surface timeout, skipping frame"),
            Err(SurfaceError::Lost) => warn!("Surface lost, skipping frame"),
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, shutting down");
                self.render_loop.stop_flag().raise();
                event_loop.exit();
            }
        }
        self.input.end_frame();

        if self.render_loop.state() == LoopState::Idle {
            event_loop.exit();
        }
    }

    /// The fatal error that ended the event loop, if any.
    pub fn take_setup_error(&mut self) -> Option<SetupError> {
        self.setup_error.take()
    }
}

impl ApplicationHandler for GeodeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.initialize(event_loop) {
            Ok(mut gpu) => {
                let mut device = gpu.renderer.frame(&gpu.context);
                self.render_loop.start(&mut device, gpu.window.as_ref());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!("Setup failed: {e}");
                self.setup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                self.render_loop.stop_flag().raise();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.context.size();
                    gpu.renderer.resize(&gpu.context.device, width, height);
                    info!("Window resized to {width}x{height}");
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(command) = self.input.handle_event(&event) {
                    self.handle_input(event_loop, command);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open the viewer window and block until it closes.
pub fn run(config: Config, texture: TextureImage) -> Result<(), SetupError> {
    let event_loop = EventLoop::new()?;
    let mut app = GeodeApp::new(config, texture);
    event_loop.run_app(&mut app)?;
    match app.take_setup_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
