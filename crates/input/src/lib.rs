//! Input model: an explicit event type for everything the windowing layer
//! delivers, plus cursor-position-to-look-delta tracking.
//!
//! # Invariants
//! - This crate never touches the windowing library; the application maps
//!   raw window events into [`InputEvent`] values.
//! - All events gathered for a frame are dispatched before that frame is
//!   rendered, as plain method calls on owned state. No global callbacks.

use glam::Vec2;

/// Mouse button identity, independent of any windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Left,
    Middle,
    Right,
    Other,
}

/// One input occurrence delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The framebuffer was resized.
    Resized { width: u32, height: u32 },
    /// The cursor moved to an absolute window position.
    CursorMoved { x: f32, y: f32 },
    /// Raw relative mouse motion, unclipped by window bounds. Axes follow
    /// window conventions: y grows downward.
    MouseMotion { dx: f32, dy: f32 },
    /// The scroll wheel moved.
    Scroll { dx: f32, dy: f32 },
    /// A mouse button changed state.
    MouseButton { button: ButtonKind, pressed: bool },
}

/// Converts absolute cursor positions into look deltas.
///
/// The first sample after construction (or after [`reset`](Self::reset))
/// only establishes the reference position and produces no delta, so the
/// view does not jump when the cursor first enters the window. The Y axis
/// is inverted: window coordinates grow downward, pitch grows upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<Vec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an absolute cursor position; returns the look delta since the
    /// previous sample, or `None` for the first sample.
    pub fn delta(&mut self, x: f32, y: f32) -> Option<Vec2> {
        let current = Vec2::new(x, y);
        let delta = self
            .last
            .map(|last| Vec2::new(current.x - last.x, last.y - current.y));
        self.last = Some(current);
        delta
    }

    /// Forget the reference position, e.g. after the cursor is recaptured.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_produces_no_delta() {
        let mut tracker = CursorTracker::new();
        assert_eq!(tracker.delta(400.0, 300.0), None);
    }

    #[test]
    fn subsequent_samples_produce_deltas() {
        let mut tracker = CursorTracker::new();
        let _ = tracker.delta(400.0, 300.0);
        assert_eq!(tracker.delta(410.0, 300.0), Some(Vec2::new(10.0, 0.0)));
        assert_eq!(tracker.delta(410.0, 290.0), Some(Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn y_axis_is_inverted() {
        let mut tracker = CursorTracker::new();
        let _ = tracker.delta(0.0, 0.0);
        // Cursor moving down the window pitches the view down.
        let delta = tracker.delta(0.0, 25.0).unwrap();
        assert_eq!(delta.y, -25.0);
    }

    #[test]
    fn reset_suppresses_the_next_delta() {
        let mut tracker = CursorTracker::new();
        let _ = tracker.delta(100.0, 100.0);
        tracker.reset();
        assert_eq!(tracker.delta(500.0, 500.0), None);
        assert!(tracker.delta(501.0, 500.0).is_some());
    }

    #[test]
    fn events_are_plain_data() {
        let event = InputEvent::MouseButton {
            button: ButtonKind::Left,
            pressed: true,
        };
        assert_eq!(
            event,
            InputEvent::MouseButton {
                button: ButtonKind::Left,
                pressed: true,
            }
        );
        assert_ne!(event, InputEvent::MouseMotion { dx: 0.0, dy: 0.0 });
    }
}
