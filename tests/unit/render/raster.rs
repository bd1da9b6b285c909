use super::*;
use crate::foundation::core::{Rect, SegmentId};

fn item(rect: Rect, opacity: f64) -> RenderItem {
    RenderItem {
        id: SegmentId(0),
        rect,
        opacity,
        color: Rgba8::new(255, 0, 0, 255),
    }
}

#[test]
fn zero_coverage_leaves_pixel() {
    let dst = [1, 2, 3, 4];
    assert_eq!(fade_toward(dst, Rgba8::WHITE, 0.0), dst);
}

#[test]
fn full_coverage_replaces_pixel() {
    let red = Rgba8::new(255, 0, 0, 255);
    assert_eq!(fade_toward([0, 0, 0, 255], red, 1.0), [255, 0, 0, 255]);
}

#[test]
fn half_white_over_black_is_mid_grey() {
    assert_eq!(fade_toward([0, 0, 0, 255], Rgba8::WHITE, 0.5), [128, 128, 128, 255]);
}

#[test]
fn translucent_segment_color_scales_coverage() {
    let vp = Viewport::new(Size::new(2.0, 2.0), 0.0);
    let mut it = item(Rect::new(0.0, 0.0, 2.0, 2.0), 1.0);
    it.color = Rgba8::new(0, 0, 255, 51);
    let settings = RasterSettings {
        use_segment_colors: true,
        ..RasterSettings::default()
    };
    let img = rasterize(&[it], &vp, 2, 2, &settings).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 51, 255]);
}

#[test]
fn empty_list_is_plain_background() {
    let vp = Viewport::new(Size::new(10.0, 10.0), 0.0);
    let img = rasterize(&[], &vp, 4, 4, &RasterSettings::default()).unwrap();
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn rect_fills_covered_pixels_only() {
    // 10x10 grid onto 10x10 pixels, no padding: identity mapping.
    let vp = Viewport::new(Size::new(10.0, 10.0), 0.0);
    let img = rasterize(
        &[item(Rect::new(2.0, 3.0, 5.0, 4.0), 1.0)],
        &vp,
        10,
        10,
        &RasterSettings::default(),
    )
    .unwrap();

    assert_eq!(img.get_pixel(2, 3).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(4, 3).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(5, 3).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(2, 4).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 3).0, [0, 0, 0, 255]);
}

#[test]
fn opacity_and_segment_colors_are_applied() {
    let vp = Viewport::new(Size::new(4.0, 4.0), 0.0);
    let settings = RasterSettings {
        use_segment_colors: true,
        ..RasterSettings::default()
    };
    let img = rasterize(
        &[item(Rect::new(0.0, 0.0, 4.0, 4.0), 0.5)],
        &vp,
        4,
        4,
        &settings,
    )
    .unwrap();
    let p = img.get_pixel(1, 1).0;
    assert_eq!(p[1], 0);
    assert_eq!(p[2], 0);
    assert!((126..=129).contains(&p[0]), "{p:?}");
    assert_eq!(p[3], 255);
}

#[test]
fn zero_sized_output_is_rejected() {
    let vp = Viewport::new(Size::new(1.0, 1.0), 0.0);
    assert!(rasterize(&[], &vp, 0, 4, &RasterSettings::default()).is_err());
}
