//! Model transform consumer
//!
//! Applies classified gestures to a model's position, orientation, and
//! uniform scale, the way a viewer applies them each frame:
//! - Rotation spins the model around its own position, on the gesture
//!   direction as axis
//! - Compression grows the scale toward an upper clamp, expansion shrinks
//!   it toward a lower clamp
//! - Translation moves the model along the gesture direction in its own
//!   local frame

use glam::{Quat, Vec2, Vec3};

use crate::config::Settings;
use crate::gesture::{Gesture, GestureKind};

/// Position, orientation, and uniform scale of the viewed model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl ModelTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one tick's gesture. `ideal_magnitude` normalizes rotation
    /// strength across screens; `dt` is the tick's frame time in seconds.
    pub fn apply(&mut self, gesture: &Gesture, settings: &Settings, ideal_magnitude: f32, dt: f32) {
        match gesture.kind() {
            GestureKind::Rotation => {
                let axis = lift(gesture.direction());
                if axis != Vec3::ZERO {
                    let speed = gesture.magnitude() / ideal_magnitude * settings.rotation_speed;
                    let turn = Quat::from_axis_angle(axis, (speed * dt).to_radians());
                    // World-axis turn about the model's own position: the
                    // position itself never moves
                    self.rotation = (turn * self.rotation).normalize();
                }
            }

            GestureKind::Compression => {
                // Upper clamp checked before the step; uniform scale
                if self.scale < settings.max_scale {
                    self.scale += settings.scale_amount;
                }
            }

            GestureKind::Expansion => {
                // Lower clamp, so the model can't shrink away or invert
                if self.scale > settings.min_scale {
                    self.scale -= settings.scale_amount;
                }
            }

            GestureKind::Translation => {
                let step = lift(gesture.direction()) * settings.translation_speed * dt;
                // Local-frame move: the current orientation carries the step
                self.position += self.rotation * step;
            }

            GestureKind::None => {}
        }
    }
}

/// Lift a camera-space direction onto the xy plane
fn lift(direction: Vec2) -> Vec3 {
    Vec3::new(direction.x, direction.y, 0.0)
}
