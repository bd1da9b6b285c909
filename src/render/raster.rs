use crate::{
    controller::RenderItem,
    foundation::{
        core::{Rgba8, Size},
        error::{FilError, FilResult},
    },
    render::viewport::Viewport,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterSettings {
    pub background: Rgba8,
    /// Paint each segment with its document color instead of plain white.
    pub use_segment_colors: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            background: Rgba8::BLACK,
            use_segment_colors: false,
        }
    }
}

/// Paint `items` as filled rects over the background, fitted through `viewport`.
///
/// A pixel is covered when its center lies inside the mapped rect.
pub fn rasterize(
    items: &[RenderItem],
    viewport: &Viewport,
    width: u32,
    height: u32,
    settings: &RasterSettings,
) -> FilResult<image::RgbaImage> {
    if width == 0 || height == 0 {
        return Err(FilError::validation("raster width/height must be > 0"));
    }

    let bg = image::Rgba([
        settings.background.r,
        settings.background.g,
        settings.background.b,
        settings.background.a,
    ]);
    let mut img = image::RgbaImage::from_pixel(width, height, bg);
    let out = Size::new(f64::from(width), f64::from(height));

    for item in items {
        let color = if settings.use_segment_colors {
            item.color
        } else {
            Rgba8::WHITE
        };
        let coverage = color.alpha_with(item.opacity);
        if coverage <= 0.0 {
            continue;
        }
        let r = viewport.map_rect(out, item.rect);

        let x_range = pixel_span(r.x0, r.x1, width);
        let y_range = pixel_span(r.y0, r.y1, height);
        for y in y_range {
            for x in x_range.clone() {
                let px = img.get_pixel_mut(x, y);
                px.0 = fade_toward(px.0, color, coverage);
            }
        }
    }

    Ok(img)
}

fn pixel_span(lo: f64, hi: f64, limit: u32) -> std::ops::Range<u32> {
    let start = (lo - 0.5).ceil().clamp(0.0, f64::from(limit)) as u32;
    let end = (hi - 0.5).ceil().clamp(0.0, f64::from(limit)) as u32;
    start..end.max(start)
}

/// Move a straight-alpha pixel toward `color` by `coverage` (0..=1).
///
/// Segments are flat fills over an opaque backdrop, so a per-channel lerp is
/// the whole blend. Alpha accumulates the same way.
pub fn fade_toward(dst: [u8; 4], color: Rgba8, coverage: f64) -> [u8; 4] {
    let k = coverage.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| -> u8 {
        let v = f64::from(from) + (f64::from(to) - f64::from(from)) * k;
        v.round().clamp(0.0, 255.0) as u8
    };
    [
        lerp(dst[0], color.r),
        lerp(dst[1], color.g),
        lerp(dst[2], color.b),
        lerp(dst[3], 255),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
