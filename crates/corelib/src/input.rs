//! Pointer and wheel input, queued between frames.
//!
//! Window-system handlers only push events; the frame loop drains the queue
//! once per frame and applies every event to the camera before it updates.

/// Raw input event in window pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    /// Wheel delta in browser units: 120 per line notch, positive when
    /// scrolling up (away from the user).
    Wheel { delta: f32 },
}

/// Wheel units reported for a single line notch.
pub const WHEEL_DELTA_PER_LINE: f32 = 120.0;

/// FIFO of input events received since the last frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every pending event in arrival order. Keeps the allocation.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_arrival_order_and_empties() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        queue.push(InputEvent::Wheel { delta: 120.0 });
        queue.push(InputEvent::PointerUp);
        assert_eq!(queue.len(), 3);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::PointerDown { x: 1.0, y: 2.0 },
                InputEvent::Wheel { delta: 120.0 },
                InputEvent::PointerUp,
            ]
        );
        assert!(queue.is_empty());
    }
}
