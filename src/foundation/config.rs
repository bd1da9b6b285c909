use std::{collections::BTreeMap, path::Path};

use crate::{
    foundation::{
        core::Size,
        error::{FilError, FilResult},
    },
    presets::resolver::{MatchRule, Preset, PresetTable},
};

/// Which built-in preset table to start from before per-preset overrides apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetMatching {
    /// Exact id membership (`V_TL_01`, `H_MM_01`, ...).
    #[default]
    Exact,
    /// Substring containment on id prefixes (`w_f`, `t_i`, ...).
    Substring,
}

/// Tuning parameters for the sequencer, all in milliseconds unless noted.
///
/// Every field has a default so a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencerConfig {
    /// Minimum time between two reveal steps.
    pub step_ms: f64,
    /// Extra active time per step; `<= 0` disables overlap.
    pub overlap_ms: f64,
    /// Time for a full 0 -> 1 fade; `0` selects the fallback rate.
    pub fade_ms: f64,
    /// Pause on the completed pattern before the preset advances.
    pub hold_ms: f64,
    /// Nominal frame interval used by the fade integrator (seconds).
    pub frame_dt_secs: f64,
    /// Seed for the reveal order; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub initial_preset: Preset,
    /// Logical authoring grid the segment rects live in.
    pub grid_width: f64,
    pub grid_height: f64,
    /// Output-space padding kept around the fitted grid.
    pub padding: f64,
    pub preset_matching: PresetMatching,
    pub presets: BTreeMap<Preset, MatchRule>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            step_ms: 33.33,
            overlap_ms: 466.67,
            fade_ms: 120.0,
            hold_ms: 1000.0,
            frame_dt_secs: 1.0 / 60.0,
            seed: None,
            initial_preset: Preset::Satellite,
            grid_width: 1450.0,
            grid_height: 860.0,
            padding: 50.0,
            preset_matching: PresetMatching::Exact,
            presets: BTreeMap::new(),
        }
    }
}

impl SequencerConfig {
    pub fn from_json_str(s: &str) -> FilResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> FilResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| FilError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> FilResult<()> {
        if !self.step_ms.is_finite() || self.step_ms <= 0.0 {
            return Err(FilError::config("step_ms must be finite and > 0"));
        }
        if !self.overlap_ms.is_finite() {
            return Err(FilError::config("overlap_ms must be finite"));
        }
        if !self.fade_ms.is_finite() || self.fade_ms < 0.0 {
            return Err(FilError::config("fade_ms must be finite and >= 0"));
        }
        if !self.hold_ms.is_finite() || self.hold_ms < 0.0 {
            return Err(FilError::config("hold_ms must be finite and >= 0"));
        }
        if !self.frame_dt_secs.is_finite() || self.frame_dt_secs <= 0.0 {
            return Err(FilError::config("frame_dt_secs must be finite and > 0"));
        }
        if !(self.grid_width > 0.0 && self.grid_height > 0.0) {
            return Err(FilError::config("grid_width/grid_height must be > 0"));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(FilError::config("padding must be finite and >= 0"));
        }
        Ok(())
    }

    pub fn overlap_enabled(&self) -> bool {
        self.overlap_ms > 0.0
    }

    pub fn grid_size(&self) -> Size {
        Size::new(self.grid_width, self.grid_height)
    }

    /// Built-in table for `preset_matching` with the `presets` overrides applied.
    pub fn preset_table(&self) -> PresetTable {
        let mut table = match self.preset_matching {
            PresetMatching::Exact => PresetTable::exact(),
            PresetMatching::Substring => PresetTable::substring(),
        };
        for (preset, rule) in &self.presets {
            table.set_rule(*preset, rule.clone());
        }
        table
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
