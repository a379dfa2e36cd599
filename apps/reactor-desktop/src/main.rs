use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use reactor_kernel::{EnergyState, FrameClock, Reactor, ReactorConfig, ReactorPart};
use reactor_overlay::Overlay;
use reactor_render_wgpu::{OrbitCamera, WgpuRenderer};
use reactor_tools::ReactorInspector;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "reactor-desktop", about = "Reactor core visualization")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Reactor configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the particle field; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Initial energy level, overriding the config file
    #[arg(long)]
    energy: Option<f32>,
}

/// Application state.
struct AppState {
    reactor: Reactor,
    overlay: Overlay,
    camera: OrbitCamera,
    clock: FrameClock,
    show_inspector: bool,
    // Input state
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
}

impl AppState {
    fn new(config: &ReactorConfig, seed: Option<u64>, energy_override: Option<f32>) -> Result<Self> {
        let energy = EnergyState::new(energy_override.unwrap_or(config.energy.initial));
        let reactor = match seed {
            Some(seed) => Reactor::with_seed(config, energy.clone(), seed)?,
            None => Reactor::new(config, energy.clone())?,
        };
        let overlay = Overlay::from_config(energy, config);
        overlay.readout().watch_transitions();

        Ok(Self {
            reactor,
            overlay,
            camera: OrbitCamera::default(),
            clock: FrameClock::new(),
            show_inspector: false,
            dragging: false,
            last_cursor: None,
        })
    }

    fn update(&mut self) {
        let frame = self.clock.tick();
        self.reactor.update(frame.elapsed, frame.delta);
        self.camera.update(frame.delta);
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::F1 => {
                self.show_inspector = !self.show_inspector;
            }
            KeyCode::Escape => {
                event_loop.exit();
            }
            _ => {}
        }
    }

    /// A release always ends the drag, even when the UI took the event.
    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState, consumed: bool) {
        if button != MouseButton::Left {
            return;
        }
        self.dragging = state == ElementState::Pressed && !consumed;
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        if self.dragging {
            if let Some(last) = self.last_cursor {
                self.camera
                    .rotate((position.x - last.x) as f32, (position.y - last.y) as f32);
            }
        }
        self.last_cursor = Some(position);
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        self.overlay.show(ctx);

        if !self.show_inspector {
            return;
        }

        let summary = ReactorInspector::summary(&self.reactor);
        egui::SidePanel::right("inspector")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Reactor");
                ui.separator();
                ui.label(format!("Frame: {}", summary.frame));
                ui.label(format!("Energy: {}", summary.energy));
                ui.label(format!(
                    "Speed: {:.3}  Pulse: {:.3}",
                    summary.speed, summary.pulse
                ));
                ui.label(format!(
                    "Particles: {} ({:.0}..{:.0})",
                    summary.particle_count, summary.band_bottom, summary.band_top
                ));
                ui.separator();

                ui.heading("Camera");
                ui.checkbox(&mut self.camera.auto_rotate, "Auto-rotate");
                ui.add(
                    egui::Slider::new(&mut self.camera.auto_rotate_speed, 0.0..=4.0)
                        .text("Speed"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut self.camera.radius,
                        self.camera.min_radius..=self.camera.max_radius,
                    )
                    .text("Distance"),
                );
                ui.separator();

                ui.heading("Parts");
                let mut toggled = None;
                for part in ReactorPart::ALL {
                    let mut mounted = self.reactor.scene().is_mounted(part);
                    if ui.checkbox(&mut mounted, part.name()).changed() {
                        toggled = Some((part, mounted));
                    }
                }
                if let Some((part, mount)) = toggled {
                    let scene = self.reactor.scene_mut();
                    if mount {
                        scene.mount(part, reactor_kernel::SceneNode::initial(part));
                    } else {
                        scene.unmount(part);
                    }
                    tracing::info!(part = part.name(), mount, "scene part toggled");
                }

                for info in ReactorInspector::list_parts(&self.reactor) {
                    ui.small(info.to_string());
                }
                if !summary.skipped.is_empty() {
                    let names: Vec<&str> = summary.skipped.iter().map(|p| p.name()).collect();
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        format!("Skipped: {}", names.join(", ")),
                    );
                }

                ui.separator();
                ui.small("F1: Toggle Inspector | LMB: Orbit | Wheel: Zoom | Esc: Quit");
            });
    }
}

/// Window, device and renderers, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn init(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, particles: usize) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Reactor Core")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("reactor_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer =
            WgpuRenderer::new(&device, surface_format, config.width, config.height, particles);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.config.width = new_size.width.max(1);
        self.config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw_egui(
        &mut self,
        egui_ctx: &EguiContext,
        view: &wgpu::TextureView,
        run_ui: impl FnMut(&EguiContext),
    ) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, run_ui);

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn redraw(&mut self) {
        self.state.update();

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        if self.state.reactor.particles_mut().take_dirty() {
            gpu.renderer
                .upload_particles(&gpu.queue, self.state.reactor.particles().positions());
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.camera,
            &self.state.reactor,
        );

        let state = &mut self.state;
        gpu.draw_egui(&self.egui_ctx, &view, |ctx| state.draw_ui(ctx));

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let particles = self.state.reactor.particles().len();
        match Gpu::init(event_loop, &self.egui_ctx, particles) {
            Ok(mut gpu) => {
                self.state.camera.aspect = gpu.aspect();
                gpu.renderer
                    .upload_particles(&gpu.queue, self.state.reactor.particles().positions());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
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
        let consumed = match &mut self.gpu {
            Some(gpu) => gpu.egui_winit.on_window_event(&gpu.window, &event).consumed,
            None => false,
        };
        if let WindowEvent::MouseInput { button, state, .. } = event {
            self.state.handle_mouse_button(button, state, consumed);
        }
        if consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                    self.state.camera.aspect = gpu.aspect();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(key, event_loop);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.handle_cursor(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.last_cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                self.state.camera.zoom(amount);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("reactor-desktop starting");

    let config = ReactorConfig::load_or_default(cli.config.as_deref())?;
    let state = AppState::new(&config, cli.seed, cli.energy)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(&ReactorConfig::default(), Some(7), None).unwrap()
    }

    #[test]
    fn release_over_ui_ends_drag() {
        let mut s = state();
        s.handle_mouse_button(MouseButton::Left, ElementState::Pressed, false);
        assert!(s.dragging);
        s.handle_mouse_button(MouseButton::Left, ElementState::Released, true);
        assert!(!s.dragging);

        let yaw = s.camera.yaw;
        s.handle_cursor(PhysicalPosition::new(10.0, 10.0));
        s.handle_cursor(PhysicalPosition::new(60.0, 10.0));
        s.camera.update(0.0);
        assert_eq!(s.camera.yaw, yaw);
    }

    #[test]
    fn press_over_ui_does_not_start_drag() {
        let mut s = state();
        s.handle_mouse_button(MouseButton::Left, ElementState::Pressed, true);
        assert!(!s.dragging);
    }

    #[test]
    fn other_buttons_leave_drag_alone() {
        let mut s = state();
        s.handle_mouse_button(MouseButton::Left, ElementState::Pressed, false);
        s.handle_mouse_button(MouseButton::Right, ElementState::Released, false);
        assert!(s.dragging);
    }
}
