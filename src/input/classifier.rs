//! Touch gesture classification
//!
//! Two positional slots are tracked independently; the i-th sample of a
//! frame always lands on slot i. Each slot cycles idle -> anchored ->
//! tracking -> idle:
//! - `Began` records the sample as the slot's anchor
//! - `Moved`/`Stationary` classify against the anchor
//! - `Ended`/`Canceled` clear the slot
//!
//! One pointer sweeping the screen is a rotation measured from its anchor,
//! so the magnitude keeps growing over the whole sweep. Two pointers are
//! classified from the dot product of their per-pointer directions:
//! co-linear motion translates, opposing motion compresses or expands, and
//! both anchors then advance to the current samples so the next tick
//! measures a fresh frame-to-frame delta.

use tracing::{debug, warn};

use super::{PointerPhase, PointerSample};
use crate::gesture::Gesture;

/// Per-slot pointer history
#[derive(Debug, Clone, Copy, Default)]
struct TrackedPointer {
    /// Sample that began (or re-seeded) the slot's current sequence
    anchor: Option<PointerSample>,
}

/// Classifies per-tick pointer samples into gestures
#[derive(Debug, Default)]
pub struct GestureClassifier {
    slots: [TrackedPointer; 2],
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one tick of samples. Only the first two samples are
    /// considered; anything past that is ignored.
    pub fn tick(&mut self, samples: &[PointerSample]) -> Gesture {
        let samples = &samples[..samples.len().min(2)];

        // Seed and retire anchors before classifying: a Began sample starts
        // a new sequence on its slot, a released sample ends it.
        for (slot, sample) in self.slots.iter_mut().zip(samples) {
            match sample.phase {
                PointerPhase::Began => slot.anchor = Some(*sample),
                // TODO: release deceleration - a lifted sweep currently
                // stops dead instead of easing out
                PointerPhase::Ended | PointerPhase::Canceled => slot.anchor = None,
                PointerPhase::Moved | PointerPhase::Stationary => {}
            }
        }

        let active: Vec<(usize, &PointerSample)> = samples
            .iter()
            .enumerate()
            .filter(|(_, sample)| sample.phase.is_active())
            .collect();

        match active.as_slice() {
            [] => Gesture::none(),
            [(index, sample)] => self.classify_single(*index, sample),
            [(_, first), (_, second), ..] => self.classify_pair(first, second),
        }
    }

    /// Forget all pointer history, as after an input device reset
    pub fn reset(&mut self) {
        self.slots = [TrackedPointer::default(); 2];
    }

    fn classify_single(&mut self, index: usize, sample: &PointerSample) -> Gesture {
        if sample.phase == PointerPhase::Began {
            // The anchor was just placed; a gesture needs a second sample
            return Gesture::none();
        }
        match self.slots[index].anchor {
            Some(anchor) => {
                let gesture = Gesture::rotation(anchor.position, sample.position);
                debug!(slot = index, %gesture, "classified single pointer");
                gesture
            }
            None => {
                // Picked up mid-gesture: adopt this sample and report on
                // the next tick
                warn!(slot = index, "moving pointer with no anchor, re-seeding");
                self.slots[index].anchor = Some(*sample);
                Gesture::none()
            }
        }
    }

    fn classify_pair(&mut self, first: &PointerSample, second: &PointerSample) -> Gesture {
        let gesture = match (self.slots[0].anchor, self.slots[1].anchor) {
            (Some(anchor0), Some(anchor1)) => {
                let direction0 = (anchor0.position - first.position).normalize_or_zero();
                let direction1 = (anchor1.position - second.position).normalize_or_zero();
                let collinearity = direction0.dot(direction1);

                if collinearity > 0.0 {
                    // Both pointers ride similar lines; the first one alone
                    // establishes the movement
                    Gesture::translation(anchor0.position, first.position)
                } else if collinearity < 0.0 {
                    Gesture::scale(
                        [anchor0.position, anchor1.position],
                        [first.position, second.position],
                    )
                } else {
                    // Perpendicular, or a pointer without a delta yet: tie
                    Gesture::none()
                }
            }
            // A slot with no history can't vote this tick
            _ => Gesture::none(),
        };

        // Pair gestures track discrete frame-to-frame changes, so both
        // anchors move up to the current samples. The single-pointer path
        // keeps its anchor and measures the whole sweep instead.
        self.slots[0].anchor = Some(*first);
        self.slots[1].anchor = Some(*second);

        debug!(%gesture, "classified pointer pair");
        gesture
    }
}
