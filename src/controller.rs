use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::{
        config::SequencerConfig,
        core::{Affine, Rect, Rgba8, SegmentId, Size, secs_to_ms},
        error::FilResult,
    },
    presets::resolver::{Preset, PresetTable},
    render::viewport::Viewport,
    segments::store::{Segment, SegmentStore},
    sequencer::{
        hold::HoldTimer,
        machine::{Sequencer, StepOutcome, StepTiming},
        opacity::OpacityIntegrator,
    },
};

/// Segments at or below this level are left out of the render list.
pub const DRAW_THRESHOLD: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Phase {
    /// Between sequence completion and the hold edge being observed.
    Idle,
    Running,
    Holding,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "ANIM",
            Self::Holding => "HOLD",
        }
    }
}

/// One drawable segment: logical-space rect plus current level.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RenderItem {
    pub id: SegmentId,
    pub rect: Rect,
    pub opacity: f64,
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ControllerStatus {
    pub preset: Preset,
    pub phase: Phase,
    pub cursor: usize,
    pub total: usize,
    /// Completed hold-and-advance transitions since construction.
    pub advances: u64,
}

impl std::fmt::Display for ControllerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Mode: {}  State: {}  Step: {}/{}",
            self.preset,
            self.phase.label(),
            self.cursor,
            self.total
        )
    }
}

/// Owns the segment store and every piece of sequencing state.
///
/// The host calls [`AnimationController::tick`] once per display frame and
/// then reads [`AnimationController::render_list`]. Nothing here reads a
/// clock, so feeding synthetic timestamps gives fully reproducible runs when
/// the config carries a seed.
#[derive(Debug)]
pub struct AnimationController<R = StdRng> {
    config: SequencerConfig,
    presets: PresetTable,
    store: SegmentStore,
    sequencer: Sequencer<R>,
    hold: HoldTimer,
    opacity: OpacityIntegrator,
    preset: Preset,
    last_tick_ms: Option<f64>,
    advances: u64,
}

impl AnimationController<StdRng> {
    /// Seeded from `config.seed` when present, OS entropy otherwise.
    pub fn new(store: SegmentStore, config: SequencerConfig) -> FilResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(store, config, rng)
    }
}

impl<R: Rng> AnimationController<R> {
    /// Build with an explicit random source. The first sequence starts immediately.
    pub fn with_rng(store: SegmentStore, config: SequencerConfig, rng: R) -> FilResult<Self> {
        config.validate()?;
        let presets = config.preset_table();
        let mut this = Self {
            sequencer: Sequencer::new(StepTiming::from_config(&config), rng),
            hold: HoldTimer::new(config.hold_ms),
            opacity: OpacityIntegrator::from_config(&config),
            preset: config.initial_preset,
            presets,
            store,
            config,
            last_tick_ms: None,
            advances: 0,
        };
        this.start_sequence(this.preset);
        Ok(this)
    }

    /// Host entry point; `timestamp_secs` is a monotonic clock in seconds.
    pub fn tick(&mut self, timestamp_secs: f64) {
        self.tick_ms(secs_to_ms(timestamp_secs));
    }

    /// Advance the whole machine to `now_ms`.
    ///
    /// Order: hold edge, hold expiry, step, expiry of entries, opacity pass.
    /// A timestamp that is not later than the previous one changes nothing.
    pub fn tick_ms(&mut self, now_ms: f64) {
        if !now_ms.is_finite() {
            tracing::debug!(now_ms, "ignoring non-finite timestamp");
            return;
        }
        if self.last_tick_ms.is_some_and(|last| now_ms <= last) {
            return;
        }
        self.last_tick_ms = Some(now_ms);

        if self.hold.observe(self.sequencer.is_active(), now_ms) {
            tracing::debug!(preset = %self.preset, now_ms, "holding");
        }

        if self.hold.is_expired(now_ms) {
            let next = self.preset.next();
            tracing::info!(from = %self.preset, to = %next, "advancing preset");
            self.advances += 1;
            self.start_sequence(next);
        }

        if let StepOutcome::Revealed(id) = self.sequencer.step(now_ms) {
            tracing::trace!(segment = %id, cursor = self.sequencer.cursor(), "step");
        }

        self.sequencer.expire(now_ms);

        let live = self.sequencer.live_mask(self.store.len());
        self.opacity
            .integrate(&mut self.store, self.sequencer.is_active(), &live);
    }

    /// Switch to `preset` and begin a fresh randomized reveal of its segments.
    pub fn start_sequence(&mut self, preset: Preset) {
        self.preset = preset;
        let visible = self.presets.apply(preset.name(), &mut self.store);
        tracing::debug!(%preset, visible, "starting sequence");
        self.sequencer.start(self.store.visible_ids());
        self.hold.arm();
    }

    /// Re-resolve visibility by name without restarting the sequence.
    ///
    /// Unknown names hide every segment and leave the current preset as is.
    pub fn apply_preset(&mut self, name: &str) -> usize {
        match Preset::parse(name) {
            Some(p) => self.preset = p,
            None => tracing::warn!(name, "unknown preset, hiding all segments"),
        }
        self.presets.apply(name, &mut self.store)
    }

    /// Drawable segments in load order.
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.store
            .segments()
            .iter()
            .filter(|s| s.opacity() > DRAW_THRESHOLD)
            .map(|s| RenderItem {
                id: s.id,
                rect: s.rect,
                opacity: s.opacity(),
                color: s.color_or_white(),
            })
            .collect()
    }

    pub fn status(&self) -> ControllerStatus {
        ControllerStatus {
            preset: self.preset,
            phase: self.phase(),
            cursor: self.sequencer.cursor(),
            total: self.sequencer.order().len(),
            advances: self.advances,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.sequencer.is_active() {
            Phase::Running
        } else if self.hold.is_holding() {
            Phase::Holding
        } else {
            Phase::Idle
        }
    }

    /// Logical grid -> output surface mapping for a host of size `out`.
    pub fn fit_transform(&self, out: Size) -> Affine {
        self.viewport().transform(out)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_config(&self.config)
    }

    pub fn current_preset(&self) -> Preset {
        self.preset
    }

    pub fn is_sequence_active(&self) -> bool {
        self.sequencer.is_active()
    }

    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn sequencer(&self) -> &Sequencer<R> {
        &self.sequencer
    }

    pub fn hold(&self) -> &HoldTimer {
        &self.hold
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "../tests/unit/controller.rs"]
mod tests;
