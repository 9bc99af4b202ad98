//! Recorded input sessions
//!
//! A trace captures everything the engine consumes over a session: the
//! screen it ran on, the input capabilities, and one `InputFrame` per
//! tick. Traces are JSON on disk so captured sessions can be replayed,
//! inspected, and diffed.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::config::Screen;
use crate::input::{Capabilities, InputFrame, PointerPhase, PointerSample};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputTrace {
    pub screen: Screen,
    pub capabilities: Capabilities,
    pub frames: Vec<InputFrame>,
}

impl InputTrace {
    pub fn new(screen: Screen, capabilities: Capabilities) -> Self {
        Self {
            screen,
            capabilities,
            frames: Vec::new(),
        }
    }

    /// Append one tick's input
    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push(frame);
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let trace: InputTrace = serde_json::from_str(&contents)?;
        info!(path = %path.display(), frames = trace.frames.len(), "Loaded trace");
        Ok(trace)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), frames = self.frames.len(), "Saved trace");
        Ok(())
    }

    /// Synthetic touch session used when no trace file is given: a
    /// one-finger sweep, a two-finger pinch in, a spread back out, then
    /// release.
    pub fn demo(screen: Screen) -> Self {
        let mut trace = Self::new(screen, Capabilities { touch_screen: true });
        let cx = screen.width as f32 / 2.0;
        let cy = screen.height as f32 / 2.0;

        // Sweep: one finger dragging down the middle of the screen
        let start = Vec2::new(cx, cy - 200.0);
        trace.push(InputFrame::from_touches(vec![PointerSample::new(
            start,
            PointerPhase::Began,
        )]));
        for step in 1..=40 {
            let position = start + Vec2::new(0.0, 4.0 * step as f32);
            trace.push(InputFrame::from_touches(vec![PointerSample::new(
                position,
                PointerPhase::Moved,
            )]));
        }
        trace.push(InputFrame::from_touches(vec![PointerSample::new(
            start + Vec2::new(0.0, 160.0),
            PointerPhase::Ended,
        )]));

        // Pinch: two fingers converging, then spreading back out
        let left = Vec2::new(cx - 120.0, cy);
        let right = Vec2::new(cx + 120.0, cy);
        trace.push(InputFrame::from_touches(vec![
            PointerSample::new(left, PointerPhase::Began),
            PointerSample::new(right, PointerPhase::Began),
        ]));
        for step in 1..=20 {
            let inset = Vec2::new(4.0 * step as f32, 0.0);
            trace.push(InputFrame::from_touches(vec![
                PointerSample::new(left + inset, PointerPhase::Moved),
                PointerSample::new(right - inset, PointerPhase::Moved),
            ]));
        }
        for step in (0..20).rev() {
            let inset = Vec2::new(4.0 * step as f32, 0.0);
            trace.push(InputFrame::from_touches(vec![
                PointerSample::new(left + inset, PointerPhase::Moved),
                PointerSample::new(right - inset, PointerPhase::Moved),
            ]));
        }
        trace.push(InputFrame::from_touches(vec![
            PointerSample::new(left, PointerPhase::Ended),
            PointerSample::new(right, PointerPhase::Ended),
        ]));

        // A beat of stillness at the end
        for _ in 0..5 {
            trace.push(InputFrame::default());
        }

        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_preserves_frames() {
        let trace = InputTrace::demo(Screen::new(720, 1440));
        let json = serde_json::to_string(&trace).unwrap();
        let restored: InputTrace = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.frames.len(), trace.frames.len());
        assert_eq!(restored.screen.width, 720);
        assert!(restored.capabilities.touch_screen);

        let original = &trace.frames[1].touches[0];
        let round_tripped = &restored.frames[1].touches[0];
        assert_eq!(round_tripped.position, original.position);
        assert_eq!(round_tripped.phase, original.phase);
    }

    #[test]
    fn test_missing_axes_default_in_json() {
        // Hand-written traces can omit the axis state entirely
        let json = r#"{
            "screen": { "width": 360, "height": 720 },
            "capabilities": { "touch_screen": true },
            "frames": [ { "touches": [] } ]
        }"#;
        let trace: InputTrace = serde_json::from_str(json).unwrap();
        assert_eq!(trace.frames.len(), 1);
        assert!(!trace.frames[0].axes.mouse_held);
    }

    #[test]
    fn test_demo_opens_with_a_fresh_touch() {
        let trace = InputTrace::demo(Screen::new(720, 1440));
        assert!(trace.frames.len() > 60);
        assert_eq!(trace.frames[0].touches[0].phase, PointerPhase::Began);
    }
}
