//! Window creation and event handling via winit.
//!
//! Provides [`AppState`] which implements winit's [`ApplicationHandler`]
//! trait, and [`run_with_config`] to start the event loop.

use std::sync::Arc;

use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use orrery_config::Config;
use orrery_input::{MouseState, OrbitController};
use orrery_render::{
    DepthBuffer, OrreryRenderer, RenderContext, RendererSettings, SurfaceError,
    init_render_context_blocking,
};
use orrery_scene::OrbitingBody;
use orrery_ui::ParameterPanel;

use crate::frame_clock::FrameClock;

/// Background clear color behind the rings and bodies.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Application state: the window, GPU resources, the live body tree and
/// everything that edits or views it.
pub struct AppState {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    depth_buffer: Option<DepthBuffer>,
    renderer: Option<OrreryRenderer>,
    clock: FrameClock,
    system: OrbitingBody,
    panel: ParameterPanel,
    /// Index into the selected entry's editable field list.
    field_index: usize,
    mouse: MouseState,
    controller: OrbitController,
}

impl AppState {
    /// Build the app around a body tree, taking camera and sim settings
    /// from the config.
    pub fn new(config: Config, system: OrbitingBody) -> Self {
        let panel = ParameterPanel::new(&system);
        let controller = OrbitController {
            distance: config.camera.distance,
            min_distance: config.camera.min_distance,
            max_distance: config.camera.max_distance,
            drag_sensitivity: config.camera.drag_sensitivity,
            ..OrbitController::default()
        };
        let clock = FrameClock::new(config.sim.max_frame_delta_ms);

        Self {
            config,
            window: None,
            gpu: None,
            depth_buffer: None,
            renderer: None,
            clock,
            system,
            panel,
            field_index: 0,
            mouse: MouseState::new(),
            controller,
        }
    }

    fn aspect_ratio(&self) -> f32 {
        match &self.gpu {
            Some(gpu) => {
                gpu.surface_config.width as f32 / gpu.surface_config.height.max(1) as f32
            }
            None => self.config.window.width as f32 / self.config.window.height.max(1) as f32,
        }
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::Escape => {
                info!("Escape pressed, shutting down");
                event_loop.exit();
            }
            KeyCode::ArrowDown => {
                self.panel.select_next();
                self.field_index = 0;
                self.log_selection();
            }
            KeyCode::ArrowUp => {
                self.panel.select_prev();
                self.field_index = 0;
                self.log_selection();
            }
            KeyCode::ArrowRight => {
                self.field_index = (self.field_index + 1) % self.panel.fields().len();
                self.log_selection();
            }
            KeyCode::ArrowLeft => {
                let count = self.panel.fields().len();
                self.field_index = (self.field_index + count - 1) % count;
                self.log_selection();
            }
            KeyCode::Equal => self.adjust_selected(1),
            KeyCode::Minus => self.adjust_selected(-1),
            _ => {}
        }
    }

    fn adjust_selected(&mut self, steps: i32) {
        let field = self.panel.fields()[self.field_index];
        self.panel.adjust(&mut self.system, field, steps);
        info!(
            "{}: {} = {:.2}",
            self.panel.selected().name,
            field.label(),
            self.panel.value(&self.system, field)
        );
    }

    fn log_selection(&self) {
        let field = self.panel.fields()[self.field_index];
        info!(
            "Selected {} / {} = {:.2}",
            self.panel.selected().name,
            field.label(),
            self.panel.value(&self.system, field)
        );
    }

    /// Run one frame: advance the simulation, update the camera, and draw.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let delta_ms = self.clock.tick();
        self.system.update(delta_ms);

        self.controller.update(&self.mouse);
        self.mouse.clear_transients();

        let mut camera = self.controller.camera(self.aspect_ratio());
        camera.fov_y = self.config.camera.fov_y_degrees.to_radians();

        let (Some(gpu), Some(depth_buffer), Some(renderer)) =
            (&self.gpu, &self.depth_buffer, &mut self.renderer)
        else {
            return;
        };

        renderer.prepare(
            &gpu.device,
            &gpu.queue,
            &camera,
            std::slice::from_ref(&self.system),
        );

        let surface_texture = match gpu.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, shutting down");
                event_loop.exit();
                return;
            }
            Err(e) => {
                // Lost or timed out; skip this frame and try again.
                tracing::debug!("Skipping frame: {e}");
                return;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("orrery-frame"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("orrery-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_buffer.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            renderer.render(&mut pass);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => {
                let size = window.inner_size();
                let depth_buffer = DepthBuffer::new(&gpu.device, size.width, size.height);
                let renderer = OrreryRenderer::new(
                    &gpu.device,
                    gpu.surface_format,
                    RendererSettings {
                        ring_segments: self.config.sim.ring_segments,
                        sphere_stacks: self.config.sim.sphere_stacks,
                        sphere_slices: self.config.sim.sphere_slices,
                    },
                );
                info!(
                    "Viewer ready: {} bodies, {}x{} surface",
                    self.system.count_inclusive(),
                    size.width,
                    size.height
                );
                self.depth_buffer = Some(depth_buffer);
                self.renderer = Some(renderer);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
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
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                if let (Some(depth_buffer), Some(gpu)) = (&mut self.depth_buffer, &self.gpu) {
                    depth_buffer.resize(
                        &gpu.device,
                        new_size.width.max(1),
                        new_size.height.max(1),
                    );
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && let PhysicalKey::Code(key) = event.physical_key
                {
                    self.handle_key(key, event_loop);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

/// Create the event loop and run the viewer until it exits.
pub fn run_with_config(
    config: Config,
    system: OrbitingBody,
) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = AppState::new(config, system);
    event_loop.run_app(&mut app)
}
