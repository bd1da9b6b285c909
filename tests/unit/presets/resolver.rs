use super::*;
use crate::foundation::core::Rect;

fn store(sids: &[&str]) -> SegmentStore {
    SegmentStore::from_rects(
        sids.iter()
            .enumerate()
            .map(|(i, sid)| (*sid, Rect::new(i as f64, 0.0, i as f64 + 1.0, 1.0))),
    )
}

#[test]
fn cycle_order_is_fixed() {
    assert_eq!(Preset::Satellite.next(), Preset::Wordmark);
    assert_eq!(Preset::Wordmark.next(), Preset::Infrapositive);
    assert_eq!(Preset::Infrapositive.next(), Preset::Satellite);
    for p in Preset::ALL {
        assert_eq!(p.next().next().next(), p);
    }
}

#[test]
fn names_parse_exactly() {
    assert_eq!(Preset::parse("wordmark"), Some(Preset::Wordmark));
    assert_eq!(Preset::parse("WORDMARK "), None);
    assert_eq!(Preset::parse(" Wordmark"), None);
    assert_eq!(Preset::parse("logo"), None);
    assert_eq!("infrapositive".parse::<Preset>().unwrap(), Preset::Infrapositive);
    assert!("logo".parse::<Preset>().is_err());
    assert_eq!(Preset::Satellite.to_string(), "satellite");
}

#[test]
fn satellite_shows_everything() {
    let table = PresetTable::exact();
    let s = store(&["V_TL_01", "zzz", ""]);
    assert_eq!(table.resolve("satellite", &s).len(), 3);
    assert!(PresetTable::substring().is_visible(Preset::Satellite, "anything"));
}

#[test]
fn satellite_cannot_be_overridden() {
    let mut table = PresetTable::exact();
    table.set_rule(Preset::Satellite, MatchRule::exact(["only"]));
    assert!(table.is_visible(Preset::Satellite, "other"));
}

#[test]
fn exact_rules_need_full_id_match() {
    let table = PresetTable::exact();
    assert!(table.is_visible(Preset::Wordmark, "V_TL_01"));
    assert!(!table.is_visible(Preset::Wordmark, "V_TL_01x"));
    assert!(!table.is_visible(Preset::Wordmark, "H_MM_01"));
    assert!(table.is_visible(Preset::Infrapositive, "H_MM_01"));
    assert!(!table.is_visible(Preset::Infrapositive, "V_TL_01"));
}

#[test]
fn substring_rules_match_fragments() {
    let table = PresetTable::substring();
    assert!(table.is_visible(Preset::Wordmark, "seg_w_f_003"));
    assert!(table.is_visible(Preset::Wordmark, "w_l"));
    assert!(!table.is_visible(Preset::Wordmark, "seg_t_f_003"));
    assert!(table.is_visible(Preset::Infrapositive, "seg_t_i_9"));
}

#[test]
fn unknown_preset_hides_everything() {
    let table = PresetTable::exact();
    let mut s = store(&["V_TL_01", "H_MM_01"]);
    assert!(table.resolve("logo", &s).is_empty());
    assert_eq!(table.apply("logo", &mut s), 0);
    assert!(s.segments().iter().all(|seg| !seg.visible()));
}

#[test]
fn apply_wordmark_hides_non_members_even_mid_fade() {
    let table = PresetTable::exact();
    let mut s = store(&[
        "V_TL_01", "V_TM_01", "V_TR_01", "V_BL_01", "V_BM_01", "V_BR_01", "H_TL_01", "H_ML_01",
        "H_BR_01", "H_MM_01", "X_99",
    ]);
    s.set_opacity(SegmentId(9), 0.6).unwrap();

    assert_eq!(table.apply("wordmark", &mut s), 9);
    for seg in &s.segments()[..9] {
        assert!(seg.visible(), "{}", seg.sid);
    }
    assert!(!s.segments()[9].visible());
    assert!(!s.segments()[10].visible());
    // Visibility changes never touch the rendered level.
    assert_eq!(s.segments()[9].opacity(), 0.6);
}

#[test]
fn match_rule_json_shape() {
    let rule: MatchRule =
        serde_json::from_str(r#"{ "match": "contains", "ids": ["w_"] }"#).unwrap();
    assert!(rule.matches("w_f"));
    let all: MatchRule = serde_json::from_str(r#"{ "match": "all" }"#).unwrap();
    assert_eq!(all, MatchRule::All);
}
