use crate::{foundation::config::SequencerConfig, segments::store::SegmentStore};

/// Fade rate (level units per second) used when no fade duration is configured.
pub const FALLBACK_FADE_RATE: f64 = 8.33;

/// Fixed-rate easing of each segment's level toward a 0/1 target.
///
/// The per-tick increment uses the nominal frame interval rather than the
/// measured one, so wall-clock fade time scales with the host's real cadence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityIntegrator {
    fade_rate: f64,
    dt_secs: f64,
}

impl OpacityIntegrator {
    pub fn new(fade_ms: f64, dt_secs: f64) -> Self {
        let fade_rate = if fade_ms > 0.0 {
            1000.0 / fade_ms
        } else {
            FALLBACK_FADE_RATE
        };
        Self { fade_rate, dt_secs }
    }

    pub fn from_config(cfg: &SequencerConfig) -> Self {
        Self::new(cfg.fade_ms, cfg.frame_dt_secs)
    }

    pub fn fade_rate(&self) -> f64 {
        self.fade_rate
    }

    /// Largest level change a single tick may apply.
    pub fn max_delta(&self) -> f64 {
        self.fade_rate * self.dt_secs
    }

    /// Move `level` toward `target` by one tick, never past it.
    pub fn approach(&self, level: f64, target: f64) -> f64 {
        let d = self.max_delta();
        if level < target {
            (level + d).min(target)
        } else if level > target {
            (level - d).max(target)
        } else {
            level
        }
    }

    /// One integration pass over the whole store.
    ///
    /// While a sequence runs the target is "has a live entry" (`live[id]`);
    /// otherwise it is the segment's preset visibility.
    pub fn integrate(&self, store: &mut SegmentStore, sequence_active: bool, live: &[bool]) {
        for seg in store.iter_mut() {
            let on = if sequence_active {
                live.get(seg.id.0).copied().unwrap_or(false)
            } else {
                seg.visible()
            };
            let target = if on { 1.0 } else { 0.0 };
            let level = self.approach(seg.opacity(), target);
            seg.set_opacity(level);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/opacity.rs"]
mod tests;
