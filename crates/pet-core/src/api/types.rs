use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canvas dimensions in pixels. Never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: clean(width),
            height: clean(height),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Point at fractions of the canvas size, e.g. `(0.15, 0.85)`.
    pub fn fraction(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }
}

/// The three timed interactions a visitor can start from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Feed,
    Pet,
    Sleep,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [Self::Feed, Self::Pet, Self::Sleep];

    /// Numeric id carried in `PetEvent::a` (0 feed, 1 pet, 2 sleep).
    pub fn id(self) -> u32 {
        match self {
            Self::Feed => 0,
            Self::Pet => 1,
            Self::Sleep => 2,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }
}

/// What a `PetEvent` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PetEventKind {
    InteractionStarted = 1,
    InteractionEnded = 2,
    InteractionRejected = 3,
}

/// An event communicated from Rust to the page, e.g. to disable buttons.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PetEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl PetEvent {
    pub const FLOATS: usize = 4;

    /// Event about an interaction; `a` holds the interaction id, `b` the
    /// frame it happened in. Frame numbers stay exact in f32 up to 2^24,
    /// unlike wall-clock milliseconds.
    pub fn interaction(kind: PetEventKind, interaction: InteractionKind, frame: u64) -> Self {
        Self {
            kind: kind as u32 as f32,
            a: interaction.id() as f32,
            b: frame as f32,
            c: 0.0,
        }
    }

    pub fn event_kind(&self) -> Option<PetEventKind> {
        match self.kind as u32 {
            1 => Some(PetEventKind::InteractionStarted),
            2 => Some(PetEventKind::InteractionEnded),
            3 => Some(PetEventKind::InteractionRejected),
            _ => None,
        }
    }

    pub fn interaction_kind(&self) -> Option<InteractionKind> {
        InteractionKind::from_id(self.a as u32)
    }
}
