#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vsplit_layout::{Detent, DragPhase, PartitionController, SplitConfig, SplitGeometry};

#[derive(Debug, Arbitrary)]
enum Op {
    Change(f64),
    End(f64),
    Cancel,
    Apply(u8, f64),
    Resize(f64),
}

#[derive(Debug, Arbitrary)]
struct Input {
    card_height: f64,
    ops: Vec<Op>,
}

fn detent(which: u8, value: f64) -> Detent {
    match which % 5 {
        0 => Detent::TopFull,
        1 => Detent::BottomFull,
        2 => Detent::TopMini,
        3 => Detent::BottomMini,
        _ => Detent::Fraction(value),
    }
}

fuzz_target!(|input: Input| {
    let config = SplitConfig::default();
    let geometry = SplitGeometry::from_card_height(input.card_height, &config);
    let mut split = PartitionController::new(config, geometry, Detent::default());

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Change(t) => split.on_drag_changed(t),
            Op::End(t) => {
                if let Some(committed) = split.on_drag_ended(t) {
                    assert_eq!(split.detent(), committed);
                    assert_eq!(split.phase(), DragPhase::Idle);
                    assert_eq!(split.overscroll(), 0.0);
                }
            }
            Op::Cancel => split.cancel_drag(),
            Op::Apply(which, value) => {
                if !split.is_dragging() {
                    split.apply_detent(detent(which, value));
                }
            }
            Op::Resize(card) => {
                split.set_geometry(SplitGeometry::from_card_height(card, &config));
            }
        }

        let range = split.geometry().range();
        assert!(split.partition().is_finite(), "partition not finite");
        assert!(split.overscroll().is_finite(), "overscroll not finite");
        assert!(split.partition().abs() <= range + 1e-9, "partition out of range");
        assert!(!(split.hide_top() && split.hide_bottom()), "both panes hidden");
        let _ = split.drain_signals().count();
    }
});
