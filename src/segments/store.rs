use std::path::Path;

use serde_json::{Map, Value};

use crate::{
    foundation::{
        core::{Rect, Rgba8, SegmentId},
        error::{FilError, FilResult},
    },
    segments::color::parse_rgba,
};

/// One rectangular region of the pattern plus its runtime animation state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    pub id: SegmentId,
    /// Semantic label from the document, only meaningful to preset matching.
    pub sid: String,
    pub name: Option<String>,
    pub rect: Rect,
    pub color: Option<Rgba8>,
    visible: bool,
    opacity: f64, // 0..1
}

impl Segment {
    fn new(id: SegmentId, sid: String, rect: Rect) -> Self {
        Self {
            id,
            sid,
            name: None,
            rect,
            color: None,
            visible: true,
            opacity: 0.0,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn color_or_white(&self) -> Rgba8 {
        self.color.unwrap_or(Rgba8::WHITE)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_opacity(&mut self, value: f64) {
        self.opacity = value.clamp(0.0, 1.0);
    }
}

/// Outcome counters of a document load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Load-ordered segments. The list itself never changes after construction,
/// only per-segment visibility and opacity do.
#[derive(Clone, Debug, Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    report: LoadReport,
}

impl SegmentStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store from `(sid, rect)` pairs, ids assigned in iteration order.
    pub fn from_rects<S: Into<String>>(items: impl IntoIterator<Item = (S, Rect)>) -> Self {
        let segments: Vec<Segment> = items
            .into_iter()
            .enumerate()
            .map(|(i, (sid, rect))| Segment::new(SegmentId(i), sid.into(), rect))
            .collect();
        let report = LoadReport {
            loaded: segments.len(),
            skipped: 0,
        };
        Self { segments, report }
    }

    /// Read and parse a segment document from disk.
    #[tracing::instrument]
    pub fn load(path: &Path) -> FilResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| FilError::load(format!("read '{}': {e}", path.display())))?;
        let doc: Value = serde_json::from_slice(&bytes)
            .map_err(|e| FilError::load(format!("parse '{}': {e}", path.display())))?;
        Self::from_value(&doc)
    }

    /// Like [`SegmentStore::load`], but a failed load yields an empty store.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "segment load failed, continuing empty");
            Self::empty()
        })
    }

    pub fn from_json_str(s: &str) -> FilResult<Self> {
        let doc: Value =
            serde_json::from_str(s).map_err(|e| FilError::load(format!("parse: {e}")))?;
        Self::from_value(&doc)
    }

    /// Parse an already decoded document.
    ///
    /// Only a missing or non-array `segments` field fails the whole load.
    /// Individual malformed entries are skipped.
    pub fn from_value(doc: &Value) -> FilResult<Self> {
        let root = doc
            .as_object()
            .ok_or_else(|| FilError::load("segment document must be a JSON object"))?;
        let entries = root
            .get("segments")
            .ok_or_else(|| FilError::load("segment document has no 'segments' field"))?
            .as_array()
            .ok_or_else(|| FilError::load("'segments' must be an array"))?;

        let mut segments = Vec::with_capacity(entries.len());
        let mut skipped = 0usize;
        for (pos, entry) in entries.iter().enumerate() {
            match parse_entry(SegmentId(segments.len()), entry) {
                Ok(seg) => segments.push(seg),
                Err(reason) => {
                    skipped += 1;
                    tracing::debug!(entry = pos, %reason, "skipping segment entry");
                }
            }
        }

        let report = LoadReport {
            loaded: segments.len(),
            skipped,
        };
        tracing::debug!(loaded = report.loaded, skipped = report.skipped, "segments loaded");
        Ok(Self { segments, report })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments.iter().map(|s| s.id)
    }

    pub fn visible_ids(&self) -> Vec<SegmentId> {
        self.segments
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.id)
            .collect()
    }

    pub fn set_visible(&mut self, id: SegmentId, visible: bool) -> FilResult<()> {
        self.get_mut(id)?.set_visible(visible);
        Ok(())
    }

    /// Set the rendered opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, id: SegmentId, value: f64) -> FilResult<()> {
        if !value.is_finite() {
            return Err(FilError::validation("opacity must be finite"));
        }
        self.get_mut(id)?.set_opacity(value);
        Ok(())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        self.segments.iter_mut()
    }

    fn get_mut(&mut self, id: SegmentId) -> FilResult<&mut Segment> {
        let len = self.segments.len();
        self.segments
            .get_mut(id.0)
            .ok_or_else(|| FilError::validation(format!("segment {id} out of range (len {len})")))
    }
}

fn parse_entry(id: SegmentId, entry: &Value) -> Result<Segment, String> {
    let obj = entry.as_object().ok_or("entry is not an object")?;
    let sid = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or("missing string 'id'")?;

    let x = number(obj, "x")?;
    let y = number(obj, "y")?;
    let w = number(obj, "w")?;
    let h = number(obj, "h")?;
    if w < 0.0 || h < 0.0 {
        return Err(format!("'{sid}' has negative size {w}x{h}"));
    }

    let mut seg = Segment::new(id, sid.to_string(), Rect::new(x, y, x + w, y + h));
    seg.name = obj.get("name").and_then(Value::as_str).map(str::to_string);
    seg.color = obj.get("color").and_then(Value::as_str).and_then(parse_rgba);
    Ok(seg)
}

// Integer and float encodings both land here via `as_f64`.
fn number(obj: &Map<String, Value>, key: &str) -> Result<f64, String> {
    let v = obj
        .get(key)
        .ok_or_else(|| format!("missing '{key}'"))?
        .as_f64()
        .ok_or_else(|| format!("'{key}' is not a number"))?;
    if !v.is_finite() {
        return Err(format!("'{key}' is not finite"));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/segments/store.rs"]
mod tests;
