use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::{
        core::SegmentId,
        error::{FilError, FilResult},
    },
    segments::store::SegmentStore,
};

const WORDMARK_IDS: [&str; 9] = [
    "V_TL_01", "V_TM_01", "V_TR_01", "V_BL_01", "V_BM_01", "V_BR_01", "H_TL_01", "H_ML_01",
    "H_BR_01",
];

const INFRAPOSITIVE_IDS: [&str; 7] = [
    "V_TM_01", "V_BM_01", "H_TL_01", "H_ML_01", "H_MR_01", "H_BR_01", "H_MM_01",
];

static MATCH_ALL: MatchRule = MatchRule::All;

const WORDMARK_PREFIXES: [&str; 3] = ["w_f", "w_i", "w_l"];
const INFRAPOSITIVE_PREFIXES: [&str; 3] = ["t_f", "t_i", "t_l"];

/// The named patterns, in cycle order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Satellite,
    Wordmark,
    Infrapositive,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::Satellite, Self::Wordmark, Self::Infrapositive];

    pub fn name(self) -> &'static str {
        match self {
            Self::Satellite => "satellite",
            Self::Wordmark => "wordmark",
            Self::Infrapositive => "infrapositive",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "satellite" => Some(Self::Satellite),
            "wordmark" => Some(Self::Wordmark),
            "infrapositive" => Some(Self::Infrapositive),
            _ => None,
        }
    }

    /// Fixed cyclic successor; never skips, never reverses.
    pub fn next(self) -> Self {
        match self {
            Self::Satellite => Self::Wordmark,
            Self::Wordmark => Self::Infrapositive,
            Self::Infrapositive => Self::Satellite,
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Preset {
    type Err = FilError;

    fn from_str(s: &str) -> FilResult<Self> {
        Self::parse(s).ok_or_else(|| FilError::validation(format!("unknown preset '{s}'")))
    }
}

/// How a preset decides whether a segment label belongs to it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "match", content = "ids", rename_all = "snake_case")]
pub enum MatchRule {
    All,
    /// Label equals one of the listed ids.
    Exact(BTreeSet<String>),
    /// Label contains any of the listed fragments.
    Contains(Vec<String>),
}

impl MatchRule {
    pub fn exact<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self::Exact(ids.into_iter().map(str::to_string).collect())
    }

    pub fn contains<'a>(fragments: impl IntoIterator<Item = &'a str>) -> Self {
        Self::Contains(fragments.into_iter().map(str::to_string).collect())
    }

    pub fn matches(&self, sid: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(ids) => ids.contains(sid),
            Self::Contains(fragments) => fragments.iter().any(|f| sid.contains(f.as_str())),
        }
    }
}

/// Preset -> visibility rule lookup.
///
/// `satellite` is pinned to "everything visible" and unknown names resolve to
/// "nothing visible"; neither case is an error.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetTable {
    rules: BTreeMap<Preset, MatchRule>,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::exact()
    }
}

impl PresetTable {
    /// Exact-id lists used by the grid logo document.
    pub fn exact() -> Self {
        Self::from_rules([
            (Preset::Wordmark, MatchRule::exact(WORDMARK_IDS)),
            (Preset::Infrapositive, MatchRule::exact(INFRAPOSITIVE_IDS)),
        ])
    }

    /// Prefix-fragment matching for documents that encode the letter in the label.
    pub fn substring() -> Self {
        Self::from_rules([
            (Preset::Wordmark, MatchRule::contains(WORDMARK_PREFIXES)),
            (
                Preset::Infrapositive,
                MatchRule::contains(INFRAPOSITIVE_PREFIXES),
            ),
        ])
    }

    fn from_rules(rules: impl IntoIterator<Item = (Preset, MatchRule)>) -> Self {
        let mut rules: BTreeMap<_, _> = rules.into_iter().collect();
        rules.insert(Preset::Satellite, MatchRule::All);
        Self { rules }
    }

    /// Replace the rule of one preset. Satellite cannot be narrowed.
    pub fn set_rule(&mut self, preset: Preset, rule: MatchRule) {
        if preset == Preset::Satellite {
            tracing::warn!("ignoring rule override for satellite, it always shows every segment");
            return;
        }
        self.rules.insert(preset, rule);
    }

    pub fn rule(&self, preset: Preset) -> &MatchRule {
        self.rules.get(&preset).unwrap_or(&MATCH_ALL)
    }

    pub fn is_visible(&self, preset: Preset, sid: &str) -> bool {
        self.rule(preset).matches(sid)
    }

    /// Ids that `preset_name` would show, in load order.
    pub fn resolve(&self, preset_name: &str, store: &SegmentStore) -> Vec<SegmentId> {
        let Some(preset) = Preset::parse(preset_name) else {
            return Vec::new();
        };
        store
            .segments()
            .iter()
            .filter(|s| self.is_visible(preset, &s.sid))
            .map(|s| s.id)
            .collect()
    }

    /// Write the preset's visibility onto every segment; returns the visible count.
    ///
    /// Opacity is left alone, so a segment hidden here may still be fading out.
    pub fn apply(&self, preset_name: &str, store: &mut SegmentStore) -> usize {
        let preset = Preset::parse(preset_name);
        let mut visible = 0;
        for seg in store.iter_mut() {
            let v = preset.is_some_and(|p| self.is_visible(p, &seg.sid));
            seg.set_visible(v);
            visible += usize::from(v);
        }
        visible
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/resolver.rs"]
mod tests;
