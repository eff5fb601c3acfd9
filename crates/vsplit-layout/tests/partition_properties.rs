//! Property tests for detent quantization, clamping and overscroll.
//!
//! Reference geometry: collar 58, card height 300 (range 242), 6 notches.

use proptest::prelude::*;
use vsplit_layout::{Detent, DragPhase, PartitionController, SplitConfig, SplitGeometry};

fn controller_with(card_height: f64, detent: Detent) -> PartitionController {
    let config = SplitConfig::default();
    let geometry = SplitGeometry::from_card_height(card_height, &config);
    PartitionController::new(config, geometry, detent)
}

fn reference(detent: Detent) -> PartitionController {
    controller_with(300.0, detent)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_even_split_and_edges() {
    let mut c = reference(Detent::default());
    assert_eq!(c.geometry().range(), 242.0);
    assert!(approx(c.apply_detent(Detent::Fraction(0.5)).partition, 0.0));
    assert!(approx(c.apply_detent(Detent::Fraction(0.0)).partition, -184.0));
}

#[test]
fn scenario_overscroll_commits_top_full() {
    let mut c = reference(Detent::default());
    let translation = 242.0 + 25.0 / 0.75;
    c.on_drag_changed(translation);
    assert!(approx(c.overscroll(), 25.0));
    assert_eq!(c.on_drag_ended(translation), Some(Detent::TopFull));
    assert!(approx(c.partition(), 242.0));
    assert!(c.hide_bottom());
    assert!(!c.hide_top());
}

#[test]
fn scenario_small_overscroll_falls_through_to_notch() {
    let mut c = reference(Detent::default());
    c.on_drag_changed(-260.0);
    assert!(approx(c.overscroll(), -13.5));
    let detent = c.on_drag_ended(-260.0);
    assert!(!matches!(detent, Some(Detent::TopFull | Detent::BottomFull)));
    assert_eq!(detent, Some(Detent::TopMini));
    assert!(!c.is_minimized());
}

#[test]
fn drag_back_out_of_hidden_top_pane() {
    let mut c = reference(Detent::BottomFull);
    assert!(c.hide_top());
    for step in 1..=20 {
        c.on_drag_changed(f64::from(step) * 10.0);
    }
    assert!(!c.is_minimized());
    // -242 + 200 - 50
    assert!(approx(c.partition(), -92.0));
    assert_eq!(c.on_drag_ended(200.0), Some(Detent::Fraction(2.0 / 6.0)));
}

#[test]
fn commit_re_arms_minimal_adjustment() {
    let mut c = reference(Detent::default());
    c.on_drag_changed(-300.0);
    assert_eq!(c.on_drag_ended(-300.0), Some(Detent::BottomFull));
    assert!(c.hide_top());
    // The next drag starts from the hidden pane and is shifted by the collar.
    c.on_drag_changed(60.0);
    assert!(approx(c.partition(), -242.0 + 60.0 - 50.0));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn interior_fractions_round_trip_through_notches(v in 0.0001f64..0.9999) {
        let c = reference(Detent::Fraction(v));
        let notch = c.notch_for_partition(c.partition());
        prop_assert_eq!(notch, (v * 6.0).round() as u32);
    }

    #[test]
    fn out_of_range_fractions_resolve_to_full(v in prop_oneof![-50.0f64..-1e-9, 1.0 + 1e-9..50.0]) {
        let mut c = reference(Detent::default());
        let applied = c.apply_detent(Detent::Fraction(v));
        let expected = if v < 0.0 { Detent::BottomFull } else { Detent::TopFull };
        prop_assert_eq!(applied.resolved, Some(expected));
        prop_assert_eq!(c.detent(), expected);
        prop_assert_eq!(applied.hide_top, v < 0.0);
        prop_assert_eq!(applied.hide_bottom, v > 1.0);
    }

    #[test]
    fn partition_stays_in_range_and_overscroll_tracks_excess(
        start in -1.0f64..=1.0,
        translations in prop::collection::vec(-600.0f64..600.0, 1..40),
    ) {
        let mut c = reference(Detent::Fraction((start + 1.0) / 2.0));
        let initial = c.partition();
        let range = c.geometry().range();
        for t in translations {
            c.on_drag_changed(t);
            prop_assert!(c.partition().abs() <= range + 1e-9);
            let raw = initial + t;
            if raw.abs() <= range {
                prop_assert_eq!(c.overscroll(), 0.0);
                prop_assert_eq!(c.phase(), DragPhase::Dragging);
            } else {
                let excess = raw - range * raw.signum();
                prop_assert!(approx(c.overscroll(), excess * 0.75));
                prop_assert_eq!(c.phase(), DragPhase::Overscrolling);
            }
        }
    }

    #[test]
    fn overscroll_past_threshold_forces_full(excess in 26.7f64..400.0, up in any::<bool>()) {
        let mut c = reference(Detent::default());
        let t = if up { -(242.0 + excess) } else { 242.0 + excess };
        c.on_drag_changed(t);
        let expected = if up { Detent::BottomFull } else { Detent::TopFull };
        prop_assert_eq!(c.on_drag_ended(t), Some(expected));
        prop_assert_eq!(c.hide_top(), up);
        prop_assert_eq!(c.hide_bottom(), !up);
        prop_assert_eq!(c.overscroll(), 0.0);
    }

    #[test]
    fn apply_detent_is_idempotent(which in 0u8..5, v in -0.5f64..1.5) {
        let detent = match which {
            0 => Detent::TopFull,
            1 => Detent::BottomFull,
            2 => Detent::TopMini,
            3 => Detent::BottomMini,
            _ => Detent::Fraction(v),
        };
        let mut c = reference(Detent::default());
        let first = c.apply_detent(detent);
        let second = c.apply_detent(detent);
        prop_assert_eq!(first.partition, second.partition);
        prop_assert_eq!(first.hide_top, second.hide_top);
        prop_assert_eq!(first.hide_bottom, second.hide_bottom);
    }

    #[test]
    fn committed_state_is_consistent(
        card in 0.0f64..900.0,
        translations in prop::collection::vec(-1200.0f64..1200.0, 1..20),
    ) {
        let mut c = controller_with(card, Detent::default());
        let last = *translations.last().unwrap_or(&0.0);
        for t in &translations {
            c.on_drag_changed(*t);
        }
        let committed = c.on_drag_ended(last);
        prop_assert!(committed.is_some());
        prop_assert!(!(c.hide_top() && c.hide_bottom()));
        prop_assert!(c.partition().is_finite());
        prop_assert!(c.partition().abs() <= c.geometry().range() + 1e-9);
        prop_assert_eq!(c.phase(), DragPhase::Idle);
        prop_assert_eq!(c.detent(), committed.unwrap_or_default());
    }

    #[test]
    fn arbitrary_floats_never_panic(values in prop::collection::vec(any::<f64>(), 1..30)) {
        let mut c = reference(Detent::default());
        for v in &values {
            c.on_drag_changed(*v);
        }
        let _ = c.on_drag_ended(values[0]);
        prop_assert!(!c.partition().is_nan());
        prop_assert!(!c.overscroll().is_nan());
    }
}
