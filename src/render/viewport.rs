use crate::foundation::{
    config::SequencerConfig,
    core::{Affine, Rect, Size, Vec2},
};

/// Aspect-preserving placement of the logical grid inside an output surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub grid: Size,
    pub padding: f64,
}

impl Viewport {
    pub fn new(grid: Size, padding: f64) -> Self {
        Self { grid, padding }
    }

    pub fn from_config(cfg: &SequencerConfig) -> Self {
        Self::new(cfg.grid_size(), cfg.padding)
    }

    /// Uniform scale `min(avail_w / grid_w, avail_h / grid_h)`, never negative.
    pub fn scale(&self, out: Size) -> f64 {
        let avail_w = out.width - self.padding * 2.0;
        let avail_h = out.height - self.padding * 2.0;
        (avail_w / self.grid.width)
            .min(avail_h / self.grid.height)
            .max(0.0)
    }

    /// Scale, then center the scaled grid in `out`.
    pub fn transform(&self, out: Size) -> Affine {
        let s = self.scale(out);
        let offset = Vec2::new(
            (out.width - self.grid.width * s) / 2.0,
            (out.height - self.grid.height * s) / 2.0,
        );
        Affine::translate(offset) * Affine::scale(s)
    }

    pub fn map_rect(&self, out: Size, rect: Rect) -> Rect {
        self.transform(out).transform_rect_bbox(rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
