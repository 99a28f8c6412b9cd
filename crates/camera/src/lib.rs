//! Free-fly camera: a viewer position and yaw/pitch orientation in world
//! space, with a derived orthonormal basis and a look-at view matrix.
//!
//! # Invariants
//! - `front`, `right`, `up` are unit length and mutually orthogonal after
//!   every orientation update.
//! - `pitch` never reaches ±90 degrees, so the basis cannot degenerate.
//! - `movement_speed` and `zoom` stay inside their configured ranges;
//!   clamping happens at the point of mutation, never lazily.

use glam::{Mat4, Vec3};

/// Directional movement command, applied per frame while a key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Which camera scalar the scroll wheel adjusts.
///
/// Earlier stages of the progression scroll the field-of-view zoom; the
/// final stage repurposes scroll for movement speed. It is a policy
/// choice, so the caller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollTarget {
    #[default]
    MovementSpeed,
    Zoom,
}

/// Tunable camera parameters: initial angles, scalar defaults, and the
/// clamp ranges the invariants are enforced against.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Initial yaw in degrees. -90 looks down -Z.
    pub yaw: f32,
    /// Initial pitch in degrees.
    pub pitch: f32,
    /// Initial movement speed in world units per second.
    pub movement_speed: f32,
    /// Multiplier applied to raw look deltas.
    pub mouse_sensitivity: f32,
    /// Initial field-of-view in degrees.
    pub zoom: f32,
    /// Pitch is clamped to [-pitch_limit, pitch_limit]; must be < 90.
    pub pitch_limit: f32,
    /// Inclusive (min, max) bounds for `movement_speed`.
    pub speed_range: (f32, f32),
    /// Inclusive (min, max) bounds for `zoom`.
    pub zoom_range: (f32, f32),
    /// Fixed world-up reference used to rebuild the basis.
    pub world_up: Vec3,
    /// Which scalar scroll input adjusts.
    pub scroll_target: ScrollTarget,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
            pitch_limit: 89.0,
            speed_range: (0.0, 5.0),
            zoom_range: (1.0, 45.0),
            world_up: Vec3::Y,
            scroll_target: ScrollTarget::default(),
        }
    }
}

/// Free-fly camera. One instance per running program, owned by the frame
/// loop and mutated in place by input-driven calls.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space location of the eye.
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
    config: CameraConfig,
}

impl Camera {
    pub fn new(position: Vec3, config: CameraConfig) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: config.world_up,
            right: Vec3::X,
            world_up: config.world_up,
            yaw: config.yaw,
            pitch: config.pitch.clamp(-config.pitch_limit, config.pitch_limit),
            movement_speed: config
                .movement_speed
                .clamp(config.speed_range.0, config.speed_range.1),
            mouse_sensitivity: config.mouse_sensitivity,
            zoom: config.zoom.clamp(config.zoom_range.0, config.zoom_range.1),
            config,
        };
        camera.update_basis();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Yaw in degrees. Unbounded; wraps implicitly through the trig below.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always strictly inside (-90, 90).
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    /// Field-of-view in degrees, for the caller's projection matrix.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Look-at transform from world space into eye space. Pure function of
    /// the current state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Move the eye along the basis, scaled by `movement_speed * dt`.
    /// `dt` is the wall-clock frame delta in seconds, `dt >= 0`.
    pub fn process_movement(&mut self, direction: MoveDirection, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
            MoveDirection::Up => self.position += self.world_up * velocity,
            MoveDirection::Down => self.position -= self.world_up * velocity,
        }
    }

    /// Apply a raw 2-D look delta. Offsets are scaled by the sensitivity,
    /// pitch is clamped, then the basis is rebuilt: `front` first, `right`
    /// and `up` from it.
    pub fn process_look_delta(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.pitch = self
            .pitch
            .clamp(-self.config.pitch_limit, self.config.pitch_limit);
        self.update_basis();
    }

    /// Apply a scroll offset to the configured scalar and clamp it. No
    /// input is ever rejected.
    pub fn process_scroll(&mut self, offset: f32) {
        match self.config.scroll_target {
            ScrollTarget::MovementSpeed => {
                let (min, max) = self.config.speed_range;
                self.movement_speed = (self.movement_speed + offset).clamp(min, max);
            }
            ScrollTarget::Zoom => {
                let (min, max) = self.config.zoom_range;
                self.zoom = (self.zoom - offset).clamp(min, max);
            }
        }
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(camera: &Camera) {
        assert!((camera.front().length() - 1.0).abs() < EPS);
        assert!((camera.right().length() - 1.0).abs() < EPS);
        assert!((camera.up().length() - 1.0).abs() < EPS);
        assert!(camera.front().dot(camera.right()).abs() < EPS);
        assert!(camera.front().dot(camera.up()).abs() < EPS);
        assert!(camera.right().dot(camera.up()).abs() < EPS);
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), CameraConfig::default());
        assert!((camera.front() - Vec3::NEG_Z).length() < EPS);

        let expected = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::Y,
        );
        assert!(camera.view_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn view_matrix_is_pure() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), CameraConfig::default());
        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn pitch_stays_inside_clamp_under_huge_deltas() {
        let mut camera = Camera::default();
        for _ in 0..10 {
            camera.process_look_delta(0.0, 1000.0);
            assert!(camera.pitch() <= 89.0);
            assert!(camera.pitch() > -90.0);
        }
        assert_eq!(camera.pitch(), 89.0);

        camera.process_look_delta(0.0, 1000.0);
        assert_eq!(camera.pitch(), 89.0);
    }

    #[test]
    fn basis_remains_orthonormal_after_look_updates() {
        let mut camera = Camera::default();
        assert_orthonormal(&camera);
        for (dx, dy) in [(35.0, 12.0), (-400.0, 9000.0), (0.25, -0.25), (1e6, -1e6)] {
            camera.process_look_delta(dx, dy);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn forward_then_backward_returns_to_start() {
        let mut camera = Camera::default();
        camera.process_look_delta(123.0, -42.0);
        let start = camera.position;
        camera.process_movement(MoveDirection::Forward, 0.75);
        camera.process_movement(MoveDirection::Backward, 0.75);
        assert!((camera.position - start).length() < EPS);
    }

    #[test]
    fn vertical_movement_follows_world_up() {
        let mut camera = Camera::default();
        camera.process_look_delta(0.0, 300.0); // pitch hard up
        let start = camera.position;
        camera.process_movement(MoveDirection::Up, 1.0);
        let moved = camera.position - start;
        assert_eq!(moved.x, 0.0);
        assert_eq!(moved.z, 0.0);
        assert!((moved.y - camera.movement_speed()).abs() < EPS);
    }

    #[test]
    fn scroll_drives_speed_to_floor_and_holds() {
        let mut camera = Camera::default();
        assert_eq!(camera.movement_speed(), 2.5);
        camera.process_scroll(-10.0);
        assert_eq!(camera.movement_speed(), 0.0);
        camera.process_scroll(-10.0);
        assert_eq!(camera.movement_speed(), 0.0);
    }

    #[test]
    fn scroll_respects_speed_ceiling() {
        let mut camera = Camera::default();
        camera.process_scroll(100.0);
        assert_eq!(camera.movement_speed(), 5.0);
    }

    #[test]
    fn scroll_can_target_zoom_instead() {
        let config = CameraConfig {
            scroll_target: ScrollTarget::Zoom,
            ..CameraConfig::default()
        };
        let mut camera = Camera::new(Vec3::ZERO, config);
        assert_eq!(camera.zoom(), 45.0);
        camera.process_scroll(10.0);
        assert_eq!(camera.zoom(), 35.0);
        camera.process_scroll(1000.0);
        assert_eq!(camera.zoom(), 1.0);
        camera.process_scroll(-1000.0);
        assert_eq!(camera.zoom(), 45.0);
        // Speed untouched in this mode.
        assert_eq!(camera.movement_speed(), 2.5);
    }

    #[test]
    fn constructor_clamps_out_of_range_config() {
        let config = CameraConfig {
            pitch: 120.0,
            movement_speed: 50.0,
            zoom: 0.0,
            ..CameraConfig::default()
        };
        let camera = Camera::new(Vec3::ZERO, config);
        assert_eq!(camera.pitch(), 89.0);
        assert_eq!(camera.movement_speed(), 5.0);
        assert_eq!(camera.zoom(), 1.0);
    }
}
