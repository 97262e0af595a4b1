//! winit events → [`InputEvent`]s for the frame queue.

use corelib::InputEvent;
use corelib::input::WHEEL_DELTA_PER_LINE;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Tracks the cursor so button events, which carry no position, can be
/// reported where the pointer is.
#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor: (f32, f32),
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput { state, button, .. } => self.button(*state, *button),
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel {
                delta: wheel_delta(delta),
            }),
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> InputEvent {
        self.cursor = (x, y);
        InputEvent::PointerMove { x, y }
    }

    /// Only the left button orbits.
    pub fn button(&self, state: ElementState, button: MouseButton) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let (x, y) = self.cursor;
        Some(match state {
            ElementState::Pressed => InputEvent::PointerDown { x, y },
            ElementState::Released => InputEvent::PointerUp,
        })
    }
}

/// Wheel delta in browser units (120 per notch, positive scrolling up).
pub fn wheel_delta(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y * WHEEL_DELTA_PER_LINE,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn press_reports_last_cursor_position() {
        let mut tracker = PointerTracker::new();
        assert_eq!(
            tracker.cursor_moved(12.0, 34.0),
            InputEvent::PointerMove { x: 12.0, y: 34.0 }
        );
        assert_eq!(
            tracker.button(ElementState::Pressed, MouseButton::Left),
            Some(InputEvent::PointerDown { x: 12.0, y: 34.0 })
        );
        assert_eq!(
            tracker.button(ElementState::Released, MouseButton::Left),
            Some(InputEvent::PointerUp)
        );
    }

    #[test]
    fn other_buttons_are_ignored() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.button(ElementState::Pressed, MouseButton::Right), None);
    }

    #[test]
    fn wheel_units() {
        assert_eq!(wheel_delta(&MouseScrollDelta::LineDelta(0.0, 1.0)), 120.0);
        assert_eq!(wheel_delta(&MouseScrollDelta::LineDelta(0.0, -2.0)), -240.0);
        assert_eq!(
            wheel_delta(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 48.0))),
            48.0
        );
    }
}
