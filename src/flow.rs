//! Application shell and event loop.
//!
//! Opens a window, builds the [`RenderCoordinator`] for it and forwards the
//! window's events:
//!
//! - `Resized` reconfigures the surface and the offscreen targets
//! - `RedrawRequested` renders one frame and requests the next, which is the
//!   per-frame tick of the animation
//! - keys drive the view: arrows rotate, `PageUp`/`PageDown` (or `+`/`-`)
//!   scale, `R` regenerates the terrain

use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    config::{CameraConfig, SceneConfig},
    context::Context,
    render::RenderCoordinator,
};

/// Degrees per arrow key press.
pub const ROTATION_STEP: i32 = 5;
/// Percent per scale key press.
pub const SCALE_STEP: i32 = 5;
pub const MIN_SCALE_PERCENT: i32 = 1;
pub const MAX_SCALE_PERCENT: i32 = 200;

/// A view change requested through the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Regenerate,
    Rotate { x: i32, y: i32 },
    Scale(i32),
}

/// Keeps the integer rotation and scale the keys step through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewControls {
    rotate_x: i32,
    rotate_y: i32,
    scale_percent: i32,
}

impl ViewControls {
    pub fn new(camera: &CameraConfig) -> Self {
        Self {
            rotate_x: camera.rotate_x,
            rotate_y: camera.rotate_y,
            scale_percent: camera.scale_percent,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<Control> {
        match key {
            KeyCode::KeyR => Some(Control::Regenerate),
            KeyCode::ArrowUp => Some(self.rotate(ROTATION_STEP, 0)),
            KeyCode::ArrowDown => Some(self.rotate(-ROTATION_STEP, 0)),
            KeyCode::ArrowLeft => Some(self.rotate(0, -ROTATION_STEP)),
            KeyCode::ArrowRight => Some(self.rotate(0, ROTATION_STEP)),
            KeyCode::PageUp | KeyCode::Equal => self.scale(SCALE_STEP),
            KeyCode::PageDown | KeyCode::Minus => self.scale(-SCALE_STEP),
            _ => None,
        }
    }

    fn rotate(&mut self, dx: i32, dy: i32) -> Control {
        self.rotate_x = (self.rotate_x + dx).rem_euclid(360);
        self.rotate_y = (self.rotate_y + dy).rem_euclid(360);
        Control::Rotate {
            x: self.rotate_x,
            y: self.rotate_y,
        }
    }

    fn scale(&mut self, delta: i32) -> Option<Control> {
        let next = (self.scale_percent + delta).clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT);
        if next == self.scale_percent {
            return None;
        }
        self.scale_percent = next;
        Some(Control::Scale(next))
    }
}

/// The window's GPU context and the renderer drawing into it.
#[derive(Debug)]
pub struct AppState {
    ctx: Context,
    coordinator: RenderCoordinator,
}

impl AppState {
    async fn new(window: Arc<Window>, config: SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let (width, height) = ctx.size();
        let coordinator = RenderCoordinator::new(
            &ctx.device,
            &ctx.queue,
            ctx.config.format,
            width,
            height,
            config,
        )
        .await?;
        Ok(Self { ctx, coordinator })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if !self.ctx.resize(width, height) {
            return;
        }
        if let Err(e) = self.coordinator.resize(&self.ctx.device, width, height) {
            log::error!("Unable to resize the render targets: {:#}", e);
        }
    }

    fn apply(&mut self, control: Control) {
        match control {
            Control::Regenerate => self.coordinator.regenerate(),
            Control::Rotate { x, y } => self.coordinator.set_rotation(x, y),
            Control::Scale(percent) => self.coordinator.set_scale(percent),
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // keep the frame loop running
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.ctx.is_surface_configured() {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        if let Err(e) = self
            .coordinator
            .frame(&self.ctx.device, &self.ctx.queue, &view)
        {
            log::error!("Unable to render the frame: {:#}", e);
        }
        output.present();
        Ok(())
    }
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(AppState),
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    // taken when the window is created
    config: Option<SceneConfig>,
    controls: ViewControls,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            controls: ViewControls::new(&config.camera),
            config: Some(config),
            state: None,
            error: None,
        })
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let config = match self.config.take() {
            Some(config) => config,
            None => return,
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("terra-ngin");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(AppState::new(window, config)) {
                Ok(mut state) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                    self.state = Some(state);
                }
                Err(e) => {
                    self.error = Some(e.context("App initialization failed"));
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match AppState::new(window, config).await {
                    Ok(state) => {
                        if proxy.send_event(FlowEvent::Initialized(state)).is_err() {
                            log::error!("The event loop closed before the app was initialized");
                        }
                    }
                    Err(e) => log::error!("App initialization failed: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(mut state) => {
                // This is the message from our wasm `spawn_local`
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(control) = self.controls.handle_key(code) {
                    log::debug!("{:?}", control);
                    state.apply(control);
                }
            }
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

/// Open a window and render the scene described by `config` until it is
/// closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    config.validate()?;

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

