//! Keyboard/mouse gesture synthesis
//!
//! Hosts without a touch screen still get rotation control: directional
//! axes are turned into one synthetic rotation gesture per tick. Axis
//! input has no pointer pair to measure, so translation and scaling are
//! never produced here.

use glam::Vec2;
use tracing::debug;

use super::AxialInput;
use crate::gesture::Gesture;

/// Classify one tick of axis state.
///
/// Keyboard axes win over the mouse; mouse movement only counts while the
/// primary button is held. Components are negated before use, and the
/// magnitude is pinned to `ideal_magnitude` - a full-speed sweep.
pub fn classify_axes(input: &AxialInput, ideal_magnitude: f32) -> Gesture {
    let keyboard = -input.keyboard;
    let mouse = -input.mouse_delta;

    let gesture = if keyboard != Vec2::ZERO {
        Gesture::rotation_from_axes(keyboard, ideal_magnitude)
    } else if input.mouse_held && mouse != Vec2::ZERO {
        Gesture::rotation_from_axes(mouse, ideal_magnitude)
    } else {
        return Gesture::none();
    };

    debug!(%gesture, "classified axis input");
    gesture
}
