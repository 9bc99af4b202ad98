//! Gesture value type
//!
//! One `Gesture` is produced per input tick and consumed immediately.
//! A gesture carries:
//! - A kind (rotation, compression, expansion, translation, or none)
//! - A non-negative magnitude in screen pixels
//! - One or two (location, direction) pairs
//!
//! The viewing camera's axis layout doesn't match the screen, so locations
//! and directions are transposed (x/y swapped) at construction. Isolating
//! the swap in the private constructors keeps every factory consistent.

use glam::Vec2;
use std::fmt;

/// What a pointer movement was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Nothing to report this tick
    None,
    /// Single-pointer sweep (or synthetic axis input)
    Rotation,
    /// Two pointers converging
    Compression,
    /// Two pointers diverging
    Expansion,
    /// Two pointers moving along the same line
    Translation,
}

/// One (location, direction) pair on a gesture, camera-space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePoint {
    /// Where the pointer currently is
    pub location: Vec2,
    /// Unit vector from the current position back toward its anchor,
    /// or zero if the pointer hasn't moved
    pub direction: Vec2,
}

/// A classified input movement, immutable once built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    kind: GestureKind,
    magnitude: f32,
    primary: GesturePoint,
    secondary: Option<GesturePoint>,
}

impl Gesture {
    fn single(kind: GestureKind, location: Vec2, direction: Vec2, magnitude: f32) -> Self {
        Self {
            kind,
            magnitude,
            primary: GesturePoint {
                location: transpose(location),
                direction: transpose(direction),
            },
            secondary: None,
        }
    }

    fn pair(
        kind: GestureKind,
        locations: [Vec2; 2],
        directions: [Vec2; 2],
        magnitude: f32,
    ) -> Self {
        Self {
            kind,
            magnitude,
            primary: GesturePoint {
                location: transpose(locations[0]),
                direction: transpose(directions[0]),
            },
            secondary: Some(GesturePoint {
                location: transpose(locations[1]),
                direction: transpose(directions[1]),
            }),
        }
    }

    /// Nothing happened this tick
    pub fn none() -> Self {
        Self::single(GestureKind::None, Vec2::ZERO, Vec2::ZERO, 0.0)
    }

    /// Rotation from a pointer's anchor -> current history. Magnitude is
    /// the full distance travelled since the anchor was placed.
    pub fn rotation(anchor: Vec2, current: Vec2) -> Self {
        let delta = anchor - current;
        Self::single(
            GestureKind::Rotation,
            current,
            delta.normalize_or_zero(),
            delta.length(),
        )
    }

    /// Rotation synthesized from keyboard/mouse axes. There is no screen
    /// location to report, and the magnitude is supplied by the caller
    /// (a full-speed sweep).
    pub fn rotation_from_axes(direction: Vec2, magnitude: f32) -> Self {
        Self::single(
            GestureKind::Rotation,
            Vec2::ZERO,
            direction.normalize_or_zero(),
            magnitude,
        )
    }

    /// Translation along the first pointer's anchor -> current line
    pub fn translation(anchor: Vec2, current: Vec2) -> Self {
        let delta = anchor - current;
        Self::single(
            GestureKind::Translation,
            current,
            delta.normalize_or_zero(),
            delta.length(),
        )
    }

    /// Compression or expansion from two opposing pointers. Picks the kind
    /// from the change in inter-pointer distance; the magnitude is the
    /// absolute distance change, and both pointers' pairs are retained.
    pub fn scale(anchors: [Vec2; 2], currents: [Vec2; 2]) -> Self {
        let current_distance = currents[0].distance(currents[1]);
        let previous_distance = anchors[0].distance(anchors[1]);
        let directions = [
            (anchors[0] - currents[0]).normalize_or_zero(),
            (anchors[1] - currents[1]).normalize_or_zero(),
        ];
        if current_distance < previous_distance {
            Self::pair(
                GestureKind::Compression,
                currents,
                directions,
                previous_distance - current_distance,
            )
        } else {
            Self::pair(
                GestureKind::Expansion,
                currents,
                directions,
                current_distance - previous_distance,
            )
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Strength of the gesture in screen pixels, always >= 0
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// The first pointer's current location, camera-space
    pub fn location(&self) -> Vec2 {
        self.primary.location
    }

    /// The first pointer's direction, camera-space, unit or zero
    pub fn direction(&self) -> Vec2 {
        self.primary.direction
    }

    /// The second pointer's pair, present only on compression/expansion
    pub fn secondary(&self) -> Option<&GesturePoint> {
        self.secondary.as_ref()
    }
}

/// Screen -> camera axis swap
fn transpose(v: Vec2) -> Vec2 {
    Vec2::new(v.y, v.x)
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ ({}, {}) toward ({}, {}), measuring {}",
            self.kind,
            self.primary.location.x,
            self.primary.location.y,
            self.primary.direction.x,
            self.primary.direction.y,
            self.magnitude
        )
    }
}
