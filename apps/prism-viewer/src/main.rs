//! Desktop viewer binary: owns the window, the GPU context, and the
//! application state, and drives the per-frame loop. All input arrives as
//! explicit [`InputEvent`] values dispatched onto the state before the
//! frame renders; there are no ambient globals.

mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use prism_camera::{Camera, CameraConfig, MoveDirection, ScrollTarget};
use prism_input::{ButtonKind, CursorTracker, InputEvent};
use prism_render::{DepthTexture, GpuContext};
use scenes::{FrameInfo, Scene, SceneKind};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// How many window pixels one scroll line is worth when the wheel reports
/// pixel deltas.
const SCROLL_PIXELS_PER_LINE: f32 = 50.0;

#[derive(Parser)]
#[command(name = "prism-viewer", about = "Prism scene progression viewer")]
struct Cli {
    /// Which scene to run
    #[arg(long, value_enum, default_value_t = SceneKind::Lighting)]
    scene: SceneKind,

    /// What the scroll wheel adjusts
    #[arg(long, value_enum, default_value_t = ScrollArg::Speed)]
    scroll_target: ScrollArg,

    /// PNG/JPEG file for the texture scene (checkerboard when omitted)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ScrollArg {
    /// Scroll adjusts movement speed (the lighting stage's behavior)
    Speed,
    /// Scroll adjusts field-of-view zoom (the earlier stages' behavior)
    Zoom,
}

impl From<ScrollArg> for ScrollTarget {
    fn from(arg: ScrollArg) -> Self {
        match arg {
            ScrollArg::Speed => ScrollTarget::MovementSpeed,
            ScrollArg::Zoom => ScrollTarget::Zoom,
        }
    }
}

/// Application state: the camera, input bookkeeping, and frame timing.
/// Owned by the frame loop; mutated only through event dispatch and the
/// per-frame update.
struct AppState {
    camera: Camera,
    cursor: CursorTracker,
    keys_held: HashSet<KeyCode>,
    last_frame: Instant,
    aspect: f32,
    /// Whether the running scene feeds input into the camera.
    camera_active: bool,
    /// Whether the cursor is grabbed. Captured look input rides on raw
    /// mouse motion; a confined cursor pins at the window edge and stops
    /// producing position deltas there.
    cursor_captured: bool,
}

impl AppState {
    fn new(scroll_target: ScrollTarget, width: u32, height: u32) -> Self {
        let config = CameraConfig {
            scroll_target,
            ..CameraConfig::default()
        };
        Self {
            camera: Camera::new(Vec3::new(0.0, 0.0, 3.0), config),
            cursor: CursorTracker::new(),
            keys_held: HashSet::new(),
            last_frame: Instant::now(),
            aspect: width as f32 / height.max(1) as f32,
            camera_active: false,
            cursor_captured: false,
        }
    }

    /// Dispatch one input event. Events for a frame are all applied before
    /// that frame renders.
    fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resized { width, height } => {
                self.aspect = width as f32 / height.max(1) as f32;
            }
            InputEvent::CursorMoved { x, y } => {
                let delta = self.cursor.delta(x, y);
                if self.camera_active && !self.cursor_captured {
                    if let Some(delta) = delta {
                        self.camera.process_look_delta(delta.x, delta.y);
                    }
                }
            }
            InputEvent::MouseMotion { dx, dy } => {
                if self.camera_active && self.cursor_captured {
                    // Raw motion reports y downward; pitch grows upward.
                    self.camera.process_look_delta(dx, -dy);
                }
            }
            InputEvent::Scroll { dy, .. } => {
                if self.camera_active {
                    self.camera.process_scroll(dy);
                }
            }
            InputEvent::MouseButton { button, pressed } => {
                let action = if pressed { "pressed" } else { "released" };
                tracing::debug!("{button:?} mouse button {action}");
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    /// Apply held movement keys for this frame's delta.
    fn update(&mut self, dt: f32) {
        if !self.camera_active {
            return;
        }
        let bindings = [
            (KeyCode::KeyW, MoveDirection::Forward),
            (KeyCode::KeyS, MoveDirection::Backward),
            (KeyCode::KeyA, MoveDirection::Left),
            (KeyCode::KeyD, MoveDirection::Right),
            (KeyCode::KeyQ, MoveDirection::Up),
            (KeyCode::KeyE, MoveDirection::Down),
        ];
        for (key, direction) in bindings {
            if self.keys_held.contains(&key) {
                self.camera.process_movement(direction, dt);
            }
        }
    }
}

struct App {
    state: AppState,
    scene_kind: SceneKind,
    texture_path: Option<PathBuf>,
    size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    depth: Option<DepthTexture>,
    scene: Option<Box<dyn Scene>>,
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli.scroll_target.into(), cli.width, cli.height),
            scene_kind: cli.scene,
            texture_path: cli.texture.clone(),
            size: PhysicalSize::new(cli.width, cli.height),
            window: None,
            gpu: None,
            depth: None,
            scene: None,
            init_error: None,
        }
    }

    /// Window, GPU, and scene setup. Any failure here is fatal: it is
    /// stored for `main` to report and the event loop is shut down.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("prism-viewer")
            .with_inner_size(self.size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = GpuContext::new(window.clone(), self.size.width, self.size.height)?;
        let depth = DepthTexture::new(gpu.device(), self.size.width, self.size.height);
        let scene = scenes::build(self.scene_kind, &gpu, self.texture_path.as_deref())?;

        self.state.camera_active = scene.uses_camera();
        if self.state.camera_active {
            window.set_cursor_visible(false);
            match window.set_cursor_grab(CursorGrabMode::Confined) {
                // Grabbed: look input comes from raw motion, which keeps
                // flowing when the pointer pins at the window edge.
                Ok(()) => self.state.cursor_captured = true,
                // Fall back to absolute positions through the tracker.
                Err(e) => tracing::warn!("cursor capture unavailable: {e}"),
            }
        }

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.depth = Some(depth);
        self.scene = Some(scene);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
            self.depth = Some(DepthTexture::new(gpu.device(), width, height));
        }
        self.state
            .apply_event(InputEvent::Resized { width, height });
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
        self.state.last_frame = now;
        self.state.update(dt);

        let (Some(gpu), Some(depth), Some(scene)) = (&self.gpu, &self.depth, &self.scene) else {
            return;
        };

        let output = match gpu.surface().get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
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

        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            let frame = FrameInfo {
                queue: gpu.queue(),
                camera: &self.state.camera,
                aspect: self.state.aspect,
            };
            scene.draw(&frame, &mut pass);
        }

        gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.init(event_loop) {
            tracing::error!("startup failed: {error:#}");
            self.init_error = Some(error);
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
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.apply_event(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(pos) => (
                        pos.x as f32 / SCROLL_PIXELS_PER_LINE,
                        pos.y as f32 / SCROLL_PIXELS_PER_LINE,
                    ),
                };
                self.state.apply_event(InputEvent::Scroll { dx, dy });
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let button = match button {
                    MouseButton::Left => ButtonKind::Left,
                    MouseButton::Middle => ButtonKind::Middle,
                    MouseButton::Right => ButtonKind::Right,
                    _ => ButtonKind::Other,
                };
                self.state.apply_event(InputEvent::MouseButton {
                    button,
                    pressed: state == ElementState::Pressed,
                });
            }
            WindowEvent::Focused(false) => {
                // Look deltas must not jump across a focus gap.
                self.state.cursor.reset();
                self.state.keys_held.clear();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.state.apply_event(InputEvent::MouseMotion {
                dx: dx as f32,
                dy: dy as f32,
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_state(captured: bool) -> AppState {
        let mut state = AppState::new(ScrollTarget::MovementSpeed, 800, 600);
        state.camera_active = true;
        state.cursor_captured = captured;
        state
    }

    #[test]
    fn raw_motion_turns_the_camera_when_captured() {
        let mut state = active_state(true);
        let yaw = state.camera.yaw();
        state.apply_event(InputEvent::MouseMotion { dx: 40.0, dy: 0.0 });
        assert!(state.camera.yaw() > yaw);
    }

    #[test]
    fn raw_motion_keeps_flowing_where_position_deltas_stop() {
        // Cursor pinned at the left edge: repeated position reports at
        // x = 0 carry no delta, but raw motion still turns the camera.
        let mut state = active_state(true);
        let yaw = state.camera.yaw();

        state.apply_event(InputEvent::CursorMoved { x: 0.0, y: 300.0 });
        state.apply_event(InputEvent::CursorMoved { x: 0.0, y: 300.0 });
        assert_eq!(state.camera.yaw(), yaw);

        state.apply_event(InputEvent::MouseMotion { dx: -25.0, dy: 0.0 });
        assert!(state.camera.yaw() < yaw);
    }

    #[test]
    fn raw_motion_inverts_y_for_pitch() {
        let mut state = active_state(true);
        // Mouse moving up reports negative dy and should pitch up.
        state.apply_event(InputEvent::MouseMotion { dx: 0.0, dy: -50.0 });
        assert!(state.camera.pitch() > 0.0);
    }

    #[test]
    fn uncaptured_fallback_uses_cursor_positions() {
        let mut state = active_state(false);
        let yaw = state.camera.yaw();

        // First sample only establishes the reference.
        state.apply_event(InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        assert_eq!(state.camera.yaw(), yaw);

        state.apply_event(InputEvent::CursorMoved { x: 420.0, y: 300.0 });
        assert!(state.camera.yaw() > yaw);

        // Raw motion is ignored on this path; it would double-apply.
        let pitch = state.camera.pitch();
        state.apply_event(InputEvent::MouseMotion { dx: 0.0, dy: -50.0 });
        assert_eq!(state.camera.pitch(), pitch);
    }

    #[test]
    fn inactive_camera_ignores_look_and_scroll() {
        let mut state = active_state(true);
        state.camera_active = false;
        let speed = state.camera.movement_speed();

        state.apply_event(InputEvent::MouseMotion { dx: 40.0, dy: 10.0 });
        state.apply_event(InputEvent::Scroll { dx: 0.0, dy: 2.0 });
        assert_eq!(state.camera.yaw(), CameraConfig::default().yaw);
        assert_eq!(state.camera.movement_speed(), speed);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("prism-viewer starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&cli);
    event_loop.run_app(&mut app)?;

    match app.init_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
