use rand::{Rng, rngs::StdRng, seq::SliceRandom};

use crate::foundation::{config::SequencerConfig, core::SegmentId};

/// One in-flight reveal. Live while `now - start_ms <= duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimationEntry {
    pub segment: SegmentId,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl AnimationEntry {
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms > self.duration_ms
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepTiming {
    pub step_ms: f64,
    /// `<= 0` means exclusive steps: each reveal replaces the previous one.
    pub overlap_ms: f64,
}

impl StepTiming {
    pub fn from_config(cfg: &SequencerConfig) -> Self {
        Self {
            step_ms: cfg.step_ms,
            overlap_ms: cfg.overlap_ms,
        }
    }

    pub fn overlap_enabled(self) -> bool {
        self.overlap_ms > 0.0
    }

    pub fn entry_duration(self) -> f64 {
        if self.overlap_enabled() {
            self.step_ms + self.overlap_ms
        } else {
            self.step_ms
        }
    }
}

/// What a call to [`Sequencer::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// No sequence is running.
    Inactive,
    /// Running, but the step interval has not elapsed yet.
    NotDue,
    Revealed(SegmentId),
    /// The order was exhausted; the sequence is now inactive.
    Completed,
}

/// Randomized one-segment-per-step reveal over a fixed set of ids.
#[derive(Clone, Debug)]
pub struct Sequencer<R = StdRng> {
    rng: R,
    timing: StepTiming,
    order: Vec<SegmentId>,
    cursor: usize,
    active: bool,
    // `None` makes the first step due on whatever tick comes next.
    last_step_ms: Option<f64>,
    entries: Vec<AnimationEntry>,
}

impl<R: Rng> Sequencer<R> {
    pub fn new(timing: StepTiming, rng: R) -> Self {
        Self {
            rng,
            timing,
            order: Vec::new(),
            cursor: 0,
            active: false,
            last_step_ms: None,
            entries: Vec::new(),
        }
    }

    /// Begin a new pass over `visible` in a fresh random order.
    #[tracing::instrument(skip_all, fields(segments = visible.len()))]
    pub fn start(&mut self, mut visible: Vec<SegmentId>) {
        visible.shuffle(&mut self.rng);
        self.order = visible;
        self.cursor = 0;
        self.active = true;
        self.last_step_ms = None;
        self.entries.clear();
    }

    /// Advance by at most one segment.
    ///
    /// The due check is a loose `elapsed > step_ms`, so host frame jitter only
    /// delays steps and never batches them.
    pub fn step(&mut self, now_ms: f64) -> StepOutcome {
        if !self.active {
            return StepOutcome::Inactive;
        }
        let due = self
            .last_step_ms
            .is_none_or(|last| now_ms - last > self.timing.step_ms);
        if !due {
            return StepOutcome::NotDue;
        }

        let Some(&segment) = self.order.get(self.cursor) else {
            self.active = false;
            tracing::debug!(steps = self.order.len(), "sequence complete");
            return StepOutcome::Completed;
        };

        if !self.timing.overlap_enabled() {
            self.entries.clear();
        }
        self.entries.push(AnimationEntry {
            segment,
            start_ms: now_ms,
            duration_ms: self.timing.entry_duration(),
        });
        self.cursor += 1;
        self.last_step_ms = Some(now_ms);
        StepOutcome::Revealed(segment)
    }

    /// Drop entries whose window has passed; returns how many were dropped.
    pub fn expire(&mut self, now_ms: f64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_expired(now_ms));
        before - self.entries.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn order(&self) -> &[SegmentId] {
        &self.order
    }

    pub fn entries(&self) -> &[AnimationEntry] {
        &self.entries
    }

    pub fn timing(&self) -> StepTiming {
        self.timing
    }

    pub fn is_live(&self, id: SegmentId) -> bool {
        self.entries.iter().any(|e| e.segment == id)
    }

    /// Per-segment "has a live entry" flags for ids `0..len`.
    pub fn live_mask(&self, len: usize) -> Vec<bool> {
        let mut mask = vec![false; len];
        for e in &self.entries {
            if let Some(slot) = mask.get_mut(e.segment.0) {
                *slot = true;
            }
        }
        mask
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/machine.rs"]
mod tests;
