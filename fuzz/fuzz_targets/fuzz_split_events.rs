#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vsplit_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use vsplit_core::geometry::Rect;
use vsplit_layout::{Detent, MenuAccessory, SplitAccessory, SplitConfig, SplitOptions};
use vsplit_runtime::{Observable, VerticalSplit};

#[derive(Debug, Arbitrary)]
enum Input {
    Down(u8, u8),
    Drag(u8, u8),
    Up(u8, u8),
    Escape,
    Resize(u8, u8),
    Write(u8),
}

fuzz_target!(|inputs: Vec<Input>| {
    let config = SplitConfig {
        collar: 3.0,
        spacing: 1.0,
        pill_height: 1.0,
        mini_adjust_inset: 0.0,
        bottom_extra_offset: 0.0,
        overscroll_commit_threshold: 2.0,
        tap_slop: 1.0,
        ..SplitConfig::default()
    };
    let options = SplitOptions::new("Top", "Bottom")
        .leading_accessories(vec![SplitAccessory::new("a")])
        .menu_accessories("+", vec![MenuAccessory::new("x"), MenuAccessory::new("y")]);
    let binding = Observable::new(Detent::default());
    let Ok(mut split) = VerticalSplit::new(binding.clone(), options, config) else {
        return;
    };
    split.set_area(Rect::new(0, 0, 40, 21));

    for input in inputs.into_iter().take(512) {
        let event = match input {
            Input::Down(x, y) => mouse(MouseEventKind::Down(MouseButton::Left), x, y),
            Input::Drag(x, y) => mouse(MouseEventKind::Drag(MouseButton::Left), x, y),
            Input::Up(x, y) => mouse(MouseEventKind::Up(MouseButton::Left), x, y),
            Input::Escape => Event::Key(KeyEvent::new(KeyCode::Escape)),
            Input::Resize(w, h) => Event::Resize {
                width: u16::from(w),
                height: u16::from(h),
            },
            Input::Write(which) => {
                binding.set(match which % 5 {
                    0 => Detent::TopFull,
                    1 => Detent::BottomFull,
                    2 => Detent::TopMini,
                    3 => Detent::BottomMini,
                    v => Detent::Fraction(f64::from(v) / 4.0),
                });
                split.sync_binding();
                continue;
            }
        };
        split.handle_event(&event);

        let controller = split.controller();
        assert!(!(controller.hide_top() && controller.hide_bottom()));
        assert!(controller.partition().abs() <= controller.geometry().range() + 1e-9);
        if !split.is_dragging() {
            assert_eq!(binding.get(), split.detent());
        }
        let _ = split.rects();
        let _ = split.drain_signals().count();
    }
});

fn mouse(kind: MouseEventKind, x: u8, y: u8) -> Event {
    Event::Mouse(MouseEvent::new(kind, u16::from(x), u16::from(y)))
}
