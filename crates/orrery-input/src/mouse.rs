//! Frame-coherent mouse state tracker.
//!
//! Accumulates winit mouse events during a frame and exposes a clean query
//! API for position, per-frame delta, drag-button state and scroll amount.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Frame-coherent mouse state.
///
/// Forward winit events via the `on_*` methods as they arrive, query the
/// accessors when ticking, then call
/// [`clear_transients`](Self::clear_transients) at the end of the frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    left_pressed: bool,
    scroll: f32,
}

impl MouseState {
    /// Creates a zeroed mouse state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        self.delta += new_pos - self.position;
        self.position = new_pos;
    }

    /// Process a `MouseInput` event. Only the left button participates in
    /// camera drags.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.left_pressed = state == ElementState::Pressed;
        }
    }

    /// Process a `MouseWheel` event. Line deltas count as rows; pixel
    /// deltas are normalized to the conventional 120-pixel row.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
        };
    }

    /// Cursor position in window pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor motion accumulated since the last `clear_transients`.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether the left button is currently held.
    pub fn dragging(&self) -> bool {
        self.left_pressed
    }

    /// Scroll rows accumulated since the last `clear_transients`.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Reset the per-frame accumulators (delta and scroll). Button and
    /// position state persists across frames.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_accumulate_delta() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(10.0, 10.0);
        mouse.on_cursor_moved(15.0, 7.0);
        assert_eq!(mouse.position(), Vec2::new(15.0, 7.0));
        assert_eq!(mouse.delta(), Vec2::new(15.0, 7.0));
    }

    #[test]
    fn test_clear_transients_keeps_position_and_button() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(4.0, 4.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));

        mouse.clear_transients();

        assert_eq!(mouse.delta(), Vec2::ZERO);
        assert_eq!(mouse.scroll(), 0.0);
        assert_eq!(mouse.position(), Vec2::new(4.0, 4.0));
        assert!(mouse.dragging());
    }

    #[test]
    fn test_only_left_button_starts_a_drag() {
        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(!mouse.dragging());
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        assert!(mouse.dragging());
        mouse.on_button(MouseButton::Left, ElementState::Released);
        assert!(!mouse.dragging());
    }

    #[test]
    fn test_pixel_scroll_normalizes_to_rows() {
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 240.0),
        ));
        assert!((mouse.scroll() - 2.0).abs() < 1e-6);
    }
}
