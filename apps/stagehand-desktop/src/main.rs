use anyhow::{Context, Result};
use clap::Parser;
use stagehand_input::{InputEvent, InputSnapshot, Key};
use stagehand_render_wgpu::SurfaceTarget;
use stagehand_scene::{FrameOutcome, Scene, SceneConfig, SceneLoop, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Pixel scroll deltas are converted to wheel lines at this rate.
const PIXELS_PER_LINE: f64 = 20.0;

#[derive(Parser)]
#[command(name = "stagehand-desktop", about = "Stagehand desktop runner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (YAML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyR => Key::R,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ControlLeft => Key::LeftControl,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

fn map_button(button: winit::event::MouseButton) -> Option<stagehand_input::MouseButton> {
    use stagehand_input::MouseButton as Button;
    match button {
        winit::event::MouseButton::Left => Some(Button::Left),
        winit::event::MouseButton::Right => Some(Button::Right),
        winit::event::MouseButton::Middle => Some(Button::Middle),
        _ => None,
    }
}

struct DesktopApp {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    target: Option<SurfaceTarget>,
    scene: Scene,
    input: InputSnapshot,
    scene_loop: SceneLoop<SystemClock>,
}

impl DesktopApp {
    fn new(config: SceneConfig) -> Self {
        let input = InputSnapshot::new();
        let scene = Scene::from_config(&config, &input);
        let scene_loop = SceneLoop::new(SystemClock::new(), config.locomotion.bindings.quit)
            .with_frame_limit(config.frame_limit);
        Self {
            config,
            window: None,
            target: None,
            scene,
            input,
            scene_loop,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_cfg = &self.config.window;
        let attrs = Window::default_attributes()
            .with_title(window_cfg.title.clone())
            .with_inner_size(PhysicalSize::new(window_cfg.width, window_cfg.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        // The look controls read relative motion, so keep the pointer captured.
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let size = window.inner_size();
        let target = pollster::block_on(SurfaceTarget::new(
            &instance,
            surface,
            size.width,
            size.height,
        ))?
        .with_unlit(self.config.shaders.marker);

        self.scene.camera_mut().set_aspect(size.width, size.height);
        self.window = Some(window);
        self.target = Some(target);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(target) = &mut self.target else {
            return;
        };

        // winit delivers the next batch of events after this handler
        // returns, which is the loop's poll step.
        let outcome = self
            .scene_loop
            .run_frame(&mut self.scene, &mut self.input, target, |_| {});

        if let FrameOutcome::Quit(reason) = outcome {
            let summary = self.scene_loop.summary(&self.scene, reason);
            tracing::info!(frames = summary.frames, ?reason, "desktop stopping");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("failed to initialise graphics: {e:#}");
            event_loop.exit();
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
                self.input.apply(&InputEvent::CloseRequested);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(target) = &mut self.target {
                    target.resize(new_size.width, new_size.height);
                    let (width, height) = target.size();
                    self.scene.camera_mut().set_aspect(width, height);
                }
            }
            WindowEvent::Focused(false) => {
                self.input.apply(&InputEvent::FocusLost);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(key) = map_key(code) {
                    let event = match state {
                        ElementState::Pressed => InputEvent::KeyDown { key, repeat },
                        ElementState::Released => InputEvent::KeyUp(key),
                    };
                    self.input.apply(&event);
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button) = map_button(button) {
                    self.input.apply(&InputEvent::Button {
                        button,
                        pressed: state == ElementState::Pressed,
                    });
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                    MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
                };
                self.input.apply(&InputEvent::Scroll { dy });
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.apply(&InputEvent::MouseMotion { dx, dy });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    tracing::info!("stagehand-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
