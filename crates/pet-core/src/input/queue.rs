use glam::Vec2;

use crate::api::types::InteractionKind;

/// Input event types the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The mouse moved to canvas coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The mouse left the canvas.
    PointerLeave,
    /// A touch began at canvas coordinates (x, y).
    TouchStart { x: f32, y: f32 },
    /// The first touch moved to canvas coordinates (x, y).
    TouchMove { x: f32, y: f32 },
    /// All touches ended.
    TouchEnd,
    /// A feed / pet / sleep button was pressed.
    Interaction(InteractionKind),
    /// The canvas was resized.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds pointer and touch events into the position the creature follows.
///
/// An active touch wins over the mouse. When both are gone the last known
/// position is kept, so the creature never loses its target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    mouse: Option<Vec2>,
    touch: Option<Vec2>,
    last: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a pointer or touch event. Other events are ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => self.mouse = Some(Vec2::new(x, y)),
            InputEvent::PointerLeave => self.mouse = None,
            InputEvent::TouchStart { x, y } | InputEvent::TouchMove { x, y } => {
                self.touch = Some(Vec2::new(x, y))
            }
            InputEvent::TouchEnd => self.touch = None,
            InputEvent::Interaction(_) | InputEvent::Resize { .. } => return,
        }
        if let Some(p) = self.touch.or(self.mouse) {
            self.last = Some(p);
        }
    }

    /// The live pointer, if a touch or mouse is currently present.
    pub fn current(&self) -> Option<Vec2> {
        self.touch.or(self.mouse)
    }

    /// The live pointer, falling back to the last position ever seen.
    pub fn last_known(&self) -> Option<Vec2> {
        self.current().or(self.last)
    }
}
