//! Frame-driven segment reveal sequencer for the FIL logo screensaver.
//!
//! A fixed set of rectangular segments is loaded once from a JSON document.
//! The [`AnimationController`] then cycles forever through three presets
//! (`satellite -> wordmark -> infrapositive`), revealing each preset's
//! segments one at a time in a random order, holding on the finished pattern,
//! and fading every segment toward its target level on each tick.
//!
//! # Per-frame flow
//!
//! 1. **Hold**: detect the falling edge of "sequence active" and start the hold clock
//! 2. **Advance**: once the hold expires, move to the next preset and restart
//! 3. **Step**: reveal at most one more segment if the step interval has passed
//! 4. **Expire**: drop reveal windows that have ended
//! 5. **Fade**: move every segment's opacity toward 0 or 1 at a fixed rate
//!
//! The core never reads a clock. Hosts pass timestamps to
//! [`AnimationController::tick`] and draw [`AnimationController::render_list`].
#![forbid(unsafe_code)]

mod controller;
mod foundation;
mod presets;
mod render;
mod segments;
mod sequencer;

pub use controller::{AnimationController, ControllerStatus, DRAW_THRESHOLD, Phase, RenderItem};
pub use foundation::config::{PresetMatching, SequencerConfig};
pub use foundation::core::{Affine, Point, Rect, Rgba8, SegmentId, Size, Vec2, secs_to_ms};
pub use foundation::error::{FilError, FilResult};
pub use presets::resolver::{MatchRule, Preset, PresetTable};
pub use render::raster::{RasterSettings, fade_toward, rasterize};
pub use render::viewport::Viewport;
pub use segments::color::parse_rgba;
pub use segments::store::{LoadReport, Segment, SegmentStore};
pub use sequencer::hold::HoldTimer;
pub use sequencer::machine::{AnimationEntry, Sequencer, StepOutcome, StepTiming};
pub use sequencer::opacity::{FALLBACK_FADE_RATE, OpacityIntegrator};
