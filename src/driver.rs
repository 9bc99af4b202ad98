//! Trace replay loop
//!
//! Drives a recorded session through the engine on a calloop timer at a
//! fixed tick rate, applying every classified gesture to a model
//! transform. The loop stops itself once the trace is exhausted and
//! reports what it did.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use tracing::{debug, info};

use crate::config::Settings;
use crate::engine::Engine;
use crate::gesture::GestureKind;
use crate::input::InputFrame;
use crate::model::ModelTransform;
use crate::trace::InputTrace;

/// What a replay did, reported once the trace is exhausted
#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub rotations: usize,
    pub compressions: usize,
    pub expansions: usize,
    pub translations: usize,
    pub transform: ModelTransform,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "replayed {} ticks: {} rotations, {} compressions, {} expansions, {} translations",
            self.ticks, self.rotations, self.compressions, self.expansions, self.translations
        )?;
        write!(
            f,
            "final transform: position ({:.2}, {:.2}, {:.2}), scale {:.2}",
            self.transform.position.x,
            self.transform.position.y,
            self.transform.position.z,
            self.transform.scale
        )
    }
}

struct ReplayState {
    engine: Engine,
    frames: Vec<InputFrame>,
    next: usize,
    dt: f32,
    summary: ReplaySummary,
}

impl ReplayState {
    /// One tick: classify the next frame and fold it into the transform
    fn step(&mut self, frame: &InputFrame) {
        let gesture = self.engine.tick(frame);
        let ideal_magnitude = self.engine.ideal_magnitude();
        self.summary
            .transform
            .apply(&gesture, self.engine.settings(), ideal_magnitude, self.dt);

        self.summary.ticks += 1;
        match gesture.kind() {
            GestureKind::Rotation => self.summary.rotations += 1,
            GestureKind::Compression => self.summary.compressions += 1,
            GestureKind::Expansion => self.summary.expansions += 1,
            GestureKind::Translation => self.summary.translations += 1,
            GestureKind::None => {}
        }

        if gesture.kind() != GestureKind::None {
            debug!(tick = self.summary.ticks, %gesture, "replay tick");
        }
    }
}

/// Replay a trace at `fps` ticks per second, returning the summary once
/// every frame has been consumed
pub fn run_replay(trace: InputTrace, settings: Settings, fps: u32) -> Result<ReplaySummary> {
    let engine = Engine::new(settings, trace.screen, trace.capabilities)?;

    let interval = Duration::from_millis((1000 / fps.max(1)).max(1) as u64);
    let dt = interval.as_secs_f32();
    info!(
        frames = trace.frames.len(),
        interval_ms = interval.as_millis() as u64,
        "Replay starting"
    );

    let mut event_loop: EventLoop<ReplayState> = EventLoop::try_new()?;
    let signal = event_loop.get_signal();

    event_loop
        .handle()
        .insert_source(Timer::from_duration(interval), move |_, _, state| {
            let frame = match state.frames.get(state.next) {
                Some(frame) => frame.clone(),
                None => {
                    signal.stop();
                    return TimeoutAction::Drop;
                }
            };
            state.next += 1;
            state.step(&frame);
            TimeoutAction::ToDuration(interval)
        })
        .map_err(|e| anyhow::anyhow!("Failed to insert replay timer: {:?}", e))?;

    let mut state = ReplayState {
        engine,
        frames: trace.frames,
        next: 0,
        dt,
        summary: ReplaySummary::default(),
    };

    event_loop.run(None::<Duration>, &mut state, |_| {})?;

    info!(ticks = state.summary.ticks, "Replay finished");
    Ok(state.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Screen;
    use crate::input::{Capabilities, PointerPhase, PointerSample};
    use glam::Vec2;

    fn sweep_trace() -> InputTrace {
        let mut trace = InputTrace::new(Screen::new(360, 720), Capabilities { touch_screen: true });
        trace.push(InputFrame::from_touches(vec![PointerSample::new(
            Vec2::new(100.0, 100.0),
            PointerPhase::Began,
        )]));
        for step in 1..=10 {
            trace.push(InputFrame::from_touches(vec![PointerSample::new(
                Vec2::new(100.0, 100.0 + 6.0 * step as f32),
                PointerPhase::Moved,
            )]));
        }
        trace.push(InputFrame::from_touches(vec![PointerSample::new(
            Vec2::new(100.0, 160.0),
            PointerPhase::Ended,
        )]));
        trace
    }

    #[test]
    fn test_replay_consumes_every_frame() {
        let trace = sweep_trace();
        let expected_ticks = trace.frames.len();

        let summary = run_replay(trace, Settings::default(), 500).unwrap();
        assert_eq!(summary.ticks, expected_ticks);
        assert_eq!(summary.rotations, 10);
        assert_eq!(summary.translations, 0);
    }

    #[test]
    fn test_replay_matches_direct_ticking() {
        let trace = sweep_trace();
        let settings = Settings::default();

        // Feed the same frames straight through an engine by hand
        let mut engine =
            Engine::new(settings.clone(), trace.screen, trace.capabilities).unwrap();
        let mut expected = ModelTransform::new();
        let dt = Duration::from_millis(2).as_secs_f32();
        for frame in &trace.frames {
            let gesture = engine.tick(frame);
            expected.apply(&gesture, &settings, engine.ideal_magnitude(), dt);
        }

        let summary = run_replay(trace, Settings::default(), 500).unwrap();
        assert!(summary
            .transform
            .rotation
            .angle_between(expected.rotation) < 1e-4);
        assert!((summary.transform.scale - expected.scale).abs() < 1e-5);
    }
}
