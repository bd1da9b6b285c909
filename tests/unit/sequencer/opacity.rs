use super::*;
use crate::foundation::core::{Rect, SegmentId};

fn unit_store(n: usize) -> SegmentStore {
    SegmentStore::from_rects((0..n).map(|i| (format!("s{i}"), Rect::new(0.0, 0.0, 1.0, 1.0))))
}

#[test]
fn rate_derives_from_fade_duration() {
    let o = OpacityIntegrator::new(120.0, 1.0 / 60.0);
    assert!((o.fade_rate() - 1000.0 / 120.0).abs() < 1e-12);
    assert_eq!(OpacityIntegrator::new(0.0, 1.0 / 60.0).fade_rate(), FALLBACK_FADE_RATE);
}

#[test]
fn approach_never_overshoots() {
    let o = OpacityIntegrator::new(10.0, 1.0 / 60.0); // 100/s -> 1.67 per tick
    assert_eq!(o.approach(0.0, 1.0), 1.0);
    assert_eq!(o.approach(1.0, 0.0), 0.0);
    assert_eq!(o.approach(0.5, 0.5), 0.5);

    let slow = OpacityIntegrator::new(1000.0, 0.1); // 0.1 per tick
    assert!((slow.approach(0.95, 1.0) - 1.0).abs() < 1e-12);
    assert!((slow.approach(0.3, 0.0) - 0.2).abs() < 1e-12);
}

#[test]
fn full_fade_takes_fade_ms_worth_of_nominal_frames() {
    // 100 ms fade at 10 ms nominal frames: exactly 10 ticks.
    let o = OpacityIntegrator::new(100.0, 0.01);
    let mut level = 0.0;
    let mut ticks = 0;
    while level < 1.0 {
        level = o.approach(level, 1.0);
        ticks += 1;
        assert!(ticks <= 11);
    }
    assert!((10..=11).contains(&ticks));
}

#[test]
fn idle_targets_follow_visibility() {
    let mut store = unit_store(2);
    store.set_visible(SegmentId(1), false).unwrap();
    store.set_opacity(SegmentId(1), 1.0).unwrap();

    let o = OpacityIntegrator::new(0.0, 1.0);
    o.integrate(&mut store, false, &[true, true]);
    assert_eq!(store.segments()[0].opacity(), 1.0);
    assert_eq!(store.segments()[1].opacity(), 0.0);
}

#[test]
fn running_targets_follow_live_entries() {
    let mut store = unit_store(3);
    for id in 0..3 {
        store.set_opacity(SegmentId(id), 0.5).unwrap();
    }
    let o = OpacityIntegrator::new(1000.0, 0.1);
    o.integrate(&mut store, true, &[false, true]);

    let levels: Vec<f64> = store.segments().iter().map(|s| s.opacity()).collect();
    assert!((levels[0] - 0.4).abs() < 1e-12);
    assert!((levels[1] - 0.6).abs() < 1e-12);
    // Missing mask slot counts as not live.
    assert!((levels[2] - 0.4).abs() < 1e-12);
}
