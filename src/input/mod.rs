//! Input boundary types
//!
//! The host hands the engine one `InputFrame` per polling tick. A frame
//! carries up to two concurrent touch samples plus the raw keyboard/mouse
//! axis state; which half the engine reads is decided once at startup from
//! the host's `Capabilities`.

pub mod axial;
pub mod classifier;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a touch point, reported by the input backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl PointerPhase {
    /// Whether the pointer is still on the screen this tick
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Began | Self::Moved | Self::Stationary)
    }
}

/// Snapshot of one touch point at one poll tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointerSample {
    /// Screen position in pixels
    pub position: Vec2,
    pub phase: PointerPhase,
    /// Contact radius in pixels, device-dependent
    #[serde(default)]
    pub radius: f32,
}

impl PointerSample {
    pub fn new(position: Vec2, phase: PointerPhase) -> Self {
        Self {
            position,
            phase,
            radius: 0.0,
        }
    }
}

/// Raw axis state for the keyboard/mouse backend
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AxialInput {
    /// Keyboard directional axes, roughly -1..1 per component
    pub keyboard: Vec2,
    /// Mouse movement since the last tick, roughly -1..1 per component
    pub mouse_delta: Vec2,
    /// Primary mouse button held
    pub mouse_held: bool,
}

/// Everything the host hands the engine for one tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputFrame {
    /// Concurrent touch samples; only the first two are read
    #[serde(default)]
    pub touches: Vec<PointerSample>,
    #[serde(default)]
    pub axes: AxialInput,
}

impl InputFrame {
    pub fn from_touches(touches: Vec<PointerSample>) -> Self {
        Self {
            touches,
            axes: AxialInput::default(),
        }
    }

    pub fn from_axes(axes: AxialInput) -> Self {
        Self {
            touches: Vec::new(),
            axes,
        }
    }
}

/// What the host's input hardware can do
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Capabilities {
    pub touch_screen: bool,
}

/// Which polling strategy a session runs with, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Touch,
    Axial,
}

impl SourceKind {
    pub fn select(capabilities: Capabilities) -> Self {
        if capabilities.touch_screen {
            Self::Touch
        } else {
            Self::Axial
        }
    }
}
