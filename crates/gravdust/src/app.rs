//! Application state and event loop

use anyhow::Result;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::sync::Arc;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use gravdust_simulation::{Bounds, InputSource, MAX_STEPS_PER_FRAME, PresetId, Sandbox};

use crate::config::SandboxConfig;
use crate::input::PointerInput;
use crate::render::{Canvas, Renderer};
use crate::ui::{HudStats, PresetToolbar, ToolbarState, show_hud};

/// Main application state
pub struct App {
    // Window and rendering
    window: Arc<Window>,
    renderer: Renderer,
    canvas: Canvas,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Simulation
    sandbox: Sandbox,
    rng: Xoshiro256StarStar,
    config: SandboxConfig,

    // UI state
    toolbar: PresetToolbar,
    toolbar_state: ToolbarState,

    input: PointerInput,

    // Timing
    frame_count: u64,
    fps_update_time: Instant,
    fps: f32,
}

impl App {
    /// Create the window, renderer and sandbox.
    ///
    /// `seed` fixes the spawn jitter; without it the rng is seeded from the OS.
    pub async fn new(config: SandboxConfig, seed: Option<u64>) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoop::new()?;

        let window_attrs = WindowAttributes::default()
            .with_title(config.window.title.clone())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = Renderer::new(&window).await?;

        // World space is the surface in physical pixels
        let size = renderer.size();
        let canvas = Canvas::new(size.width, size.height);
        let mut sandbox = Sandbox::new(bounds_for(size), config.physics);
        sandbox.select(config.brush.default_preset);

        let rng = match seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::from_rng(&mut rand::rng()),
        };

        let toolbar = PresetToolbar::new(sandbox.presets());
        let toolbar_state = ToolbarState::new(
            config.brush.default_preset,
            config.brush.default_size,
            config.brush.max_size,
        );
        let input = PointerInput::new(
            config.brush.default_size,
            config.brush.max_size,
            config.brush.default_preset,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &renderer.device,
            renderer.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        log::info!(
            "World {}x{}, brush {}, type {}",
            size.width,
            size.height,
            toolbar_state.brush_size,
            toolbar_state.active
        );

        Ok((
            Self {
                window,
                renderer,
                canvas,
                egui_ctx,
                egui_state,
                egui_renderer,
                sandbox,
                rng,
                config,
                toolbar,
                toolbar_state,
                input,
                frame_count: 0,
                fps_update_time: Instant::now(),
                fps: 0.0,
            },
            event_loop,
        ))
    }

    /// Run the event loop
    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Push toolbar edits into the input adapter and sandbox
    fn sync_toolbar(&mut self) {
        let state = &mut self.toolbar_state;
        self.input.set_brush_size(state.brush_size);
        self.input.set_active_type(state.active);
        self.sandbox.set_paused(state.paused);
        self.sandbox.set_steps_per_frame(state.steps_per_frame);

        let (clear, step) = state.take_requests();
        if clear {
            self.sandbox.world_mut().clear();
        }
        if step {
            self.sandbox.request_step();
        }
    }

    /// Advance one frame: spawn, tick and paint the canvas
    fn update(&mut self) {
        let now = Instant::now();

        self.frame_count += 1;
        if now.duration_since(self.fps_update_time).as_secs_f32() >= 1.0 {
            self.fps = self.frame_count as f32;
            self.frame_count = 0;
            self.fps_update_time = now;
        }

        self.sync_toolbar();

        let frame = self.input.sample();
        self.sandbox.frame(&frame, &mut self.rng, &mut self.canvas);
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.upload_canvas(&self.canvas);

        // Collect data for egui closure to avoid borrow checker issues
        let world = self.sandbox.world();
        let stats = HudStats {
            fps: self.fps,
            particle_count: world.len(),
            created_total: self.sandbox.counter().total(),
            brush_size: self.input.brush_size(),
            active_name: self.sandbox.active_preset().name,
            paused: self.sandbox.is_paused(),
            kinetic_energy: world.kinetic_energy(),
        };

        let output = self.renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.renderer
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render_encoder"),
                });

        self.renderer.render_canvas(&mut encoder, &view);

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if self.config.ui.show_toolbar {
                self.toolbar.show(ctx, &mut self.toolbar_state);
            }
            show_hud(ctx, &stats, &self.config.ui);
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(
                &self.renderer.device,
                &self.renderer.queue,
                *id,
                delta,
            );
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.renderer.size().width, self.renderer.size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            &self.renderer.device,
            &self.renderer.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.renderer
            .queue
            .submit(std::iter::once(encoder.finish()));
        self.renderer.end_frame(output);

        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.renderer.resize(size);
        self.canvas.resize(size.width, size.height);
        self.sandbox.world_mut().resize(bounds_for(size));
    }

    /// Grow or shrink the brush, keeping toolbar and pointer in step
    fn adjust_brush(&mut self, delta: i32) {
        self.input.set_brush_size(self.toolbar_state.brush_size);
        self.input.adjust_brush(delta);
        self.toolbar_state.brush_size = self.input.brush_size();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Space => {
                self.sandbox.toggle_pause();
                self.toolbar_state.paused = self.sandbox.is_paused();
            }
            KeyCode::KeyS => {
                if self.toolbar_state.paused {
                    self.toolbar_state.step_requested = true;
                }
            }
            KeyCode::KeyC => self.toolbar_state.clear_requested = true,
            KeyCode::BracketLeft => self.adjust_brush(-1),
            KeyCode::BracketRight => self.adjust_brush(1),
            KeyCode::Equal => {
                let steps = &mut self.toolbar_state.steps_per_frame;
                *steps = (*steps + 1).min(MAX_STEPS_PER_FRAME);
            }
            KeyCode::Minus => {
                let steps = &mut self.toolbar_state.steps_per_frame;
                *steps = steps.saturating_sub(1).max(1);
            }
            KeyCode::Tab => self.toolbar_state.active = self.sandbox.cycle_active_type(),
            KeyCode::Digit1 => self.toolbar_state.active = PresetId::Powder,
            KeyCode::Digit2 => self.toolbar_state.active = PresetId::Water,
            KeyCode::Digit3 => self.toolbar_state.active = PresetId::Oxygen,
            KeyCode::Digit4 => self.toolbar_state.active = PresetId::Hydrogen,
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }
}

fn bounds_for(size: PhysicalSize<u32>) -> Bounds {
    Bounds::new(size.width as f64, size.height as f64)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window is created up front in App::new
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle events first; button releases always reach the
        // pointer so a drag ending over the toolbar stops spawning
        let egui_response = self.egui_state.on_window_event(&self.window, &event);
        if egui_response.consumed
            && !matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    ..
                }
            )
        {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.resize(size);
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                }
                self.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.cursor_left();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.input.set_pressed(state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                self.adjust_brush(scroll.round() as i32);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && let PhysicalKey::Code(key) = event.physical_key
                {
                    self.handle_key(event_loop, key);
                }
            }
            _ => {}
        }
    }
}
