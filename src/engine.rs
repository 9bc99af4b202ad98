//! Session-scoped classification engine
//!
//! Owns the tuning knobs, the screen geometry, and the pointer history for
//! one session. The input strategy (touch vs keyboard/mouse) is chosen
//! once at construction and never changes afterwards.

use tracing::info;

use crate::config::{Screen, Settings};
use crate::error::Error;
use crate::gesture::Gesture;
use crate::input::{axial, classifier::GestureClassifier, Capabilities, InputFrame, SourceKind};
use crate::Result;

#[derive(Debug)]
pub struct Engine {
    settings: Settings,
    screen: Screen,
    ideal_magnitude: f32,
    source: SourceKind,
    classifier: GestureClassifier,
}

impl Engine {
    /// Build an engine for one session. A screen whose ideal magnitude
    /// comes out zero cannot normalize gesture strength and is rejected
    /// up front.
    pub fn new(settings: Settings, screen: Screen, capabilities: Capabilities) -> Result<Self> {
        let ideal_magnitude = screen.ideal_magnitude();
        if ideal_magnitude <= 0.0 {
            return Err(Error::DegenerateScreen {
                width: screen.width,
                height: screen.height,
            });
        }

        let source = SourceKind::select(capabilities);
        info!(?source, ideal_magnitude, "Gesture engine ready");

        Ok(Self {
            settings,
            screen,
            ideal_magnitude,
            source,
            classifier: GestureClassifier::new(),
        })
    }

    /// Classify one tick of input into a gesture
    pub fn tick(&mut self, frame: &InputFrame) -> Gesture {
        match self.source {
            SourceKind::Touch => self.classifier.tick(&frame.touches),
            SourceKind::Axial => axial::classify_axes(&frame.axes, self.ideal_magnitude),
        }
    }

    /// Forget pointer history, as after an input device reset
    pub fn reset(&mut self) {
        self.classifier.reset();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Half the smaller screen dimension; a full-speed gesture's strength
    pub fn ideal_magnitude(&self) -> f32 {
        self.ideal_magnitude
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureKind;
    use crate::input::{AxialInput, PointerPhase, PointerSample};
    use glam::Vec2;

    fn touch_engine() -> Engine {
        Engine::new(
            Settings::default(),
            Screen::new(360, 720),
            Capabilities { touch_screen: true },
        )
        .unwrap()
    }

    #[test]
    fn test_degenerate_screen_is_rejected() {
        let result = Engine::new(
            Settings::default(),
            Screen::new(0, 720),
            Capabilities { touch_screen: true },
        );
        assert!(matches!(
            result,
            Err(Error::DegenerateScreen { width: 0, height: 720 })
        ));
    }

    #[test]
    fn test_touch_frames_reach_the_classifier() {
        let mut engine = touch_engine();
        let down = InputFrame::from_touches(vec![PointerSample::new(
            Vec2::new(100.0, 100.0),
            PointerPhase::Began,
        )]);
        assert_eq!(engine.tick(&down).kind(), GestureKind::None);

        let drag = InputFrame::from_touches(vec![PointerSample::new(
            Vec2::new(100.0, 160.0),
            PointerPhase::Moved,
        )]);
        let gesture = engine.tick(&drag);
        assert_eq!(gesture.kind(), GestureKind::Rotation);
        assert!((gesture.magnitude() - 60.0).abs() < 1e-5);
    }

    #[test]
    fn test_source_selection_is_fixed_at_startup() {
        let mut engine = Engine::new(
            Settings::default(),
            Screen::new(360, 720),
            Capabilities { touch_screen: false },
        )
        .unwrap();
        assert_eq!(engine.source(), SourceKind::Axial);

        // Touch samples in the frame are ignored on an axial session; the
        // keyboard axes drive the result
        let mut frame = InputFrame::from_axes(AxialInput {
            keyboard: Vec2::new(1.0, 0.0),
            ..Default::default()
        });
        frame.touches.push(PointerSample::new(
            Vec2::new(100.0, 100.0),
            PointerPhase::Moved,
        ));

        let gesture = engine.tick(&frame);
        assert_eq!(gesture.kind(), GestureKind::Rotation);
        assert_eq!(gesture.magnitude(), 180.0);
    }
}
