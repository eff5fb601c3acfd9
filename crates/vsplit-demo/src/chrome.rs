#![forbid(unsafe_code)]

//! Drawing a split: pane content, collar overlays and the handle row.

use std::io::{self, Write};

use crossterm::style::Color;
use vsplit::{HandleSlot, PaneFrame, Rect, SplitFrame, SplitRects, VerticalSplit, accessory_slots, menu_slots};

use crate::canvas::{Canvas, DIM, HANDLE_BG, tint_color};
use crate::screens::Screen;

/// Overlay text replaces pane content past this opacity.
const OVERLAY_CUTOFF: f64 = 0.5;
/// Grip width in cells at rest.
const GRIP_CELLS: f64 = 6.0;

/// Single-cell stand-in for an accessory symbol.
#[must_use]
pub fn glyph(symbol: &str) -> char {
    match symbol {
        "figure.walk" => 'w',
        "car" => 'c',
        "tram" => 't',
        "mountain.2.fill" => '^',
        "arrow.up.circle.fill" => '↑',
        "arrow.uturn.backward.circle.fill" => '↶',
        "arrow.uturn.forward.circle.fill" => '↷',
        "arrow.counterclockwise.circle.fill" => '⟲',
        "plus.circle.fill" => '+',
        "pencil.tip.crop.circle" => '✎',
        "wand.and.stars" => '*',
        s if s.starts_with("arrow.") => '↔',
        s => s.chars().next().map_or('?', |c| c.to_ascii_uppercase()),
    }
}

pub fn draw_split(
    canvas: &mut Canvas<&mut dyn Write>,
    split: &VerticalSplit,
    screen: &dyn Screen,
) -> io::Result<()> {
    let Some(rects) = split.rects() else {
        return Ok(());
    };
    let frame = split.frame();

    if let (Some(area), Some(pane)) = (rects.top, frame.top.as_ref()) {
        screen.draw_top(canvas, area, pane)?;
        draw_overlay(canvas, area, pane, screen.top_overlay())?;
    }
    if let (Some(area), Some(pane)) = (rects.bottom, frame.bottom.as_ref()) {
        screen.draw_bottom(canvas, area, pane)?;
        draw_overlay(canvas, area, pane, screen.bottom_overlay())?;
    }
    draw_handle(canvas, split, &rects, &frame)
}

fn draw_overlay(
    canvas: &mut Canvas<&mut dyn Write>,
    area: Rect,
    pane: &PaneFrame,
    text: &str,
) -> io::Result<()> {
    if pane.overlay_opacity < OVERLAY_CUTOFF || area.is_empty() {
        return Ok(());
    }
    canvas.fill(area, ' ', Color::Reset, HANDLE_BG)?;
    canvas.centered(area, area.y + area.height / 2, text, Color::White, HANDLE_BG)
}

fn draw_handle(
    canvas: &mut Canvas<&mut dyn Write>,
    split: &VerticalSplit,
    rects: &SplitRects,
    frame: &SplitFrame,
) -> io::Result<()> {
    let handle = rects.handle;
    canvas.fill(handle, ' ', Color::Reset, HANDLE_BG)?;
    let options = split.options();

    if frame.menu_open {
        for (item, slot) in options.menu.iter().zip(menu_slots(handle, options)) {
            let label = format!("{} {}", glyph(&item.symbol), item.title);
            canvas.centered(slot, slot.y, &label, tint_color(item.tint), HANDLE_BG)?;
        }
        return Ok(());
    }

    let (label, color) = if frame.handle.pill {
        (frame.handle.title.clone(), Color::White)
    } else {
        (grip(frame.handle.grabber_scale), DIM)
    };
    canvas.centered(handle, handle.y, &label, color, HANDLE_BG)?;

    for (slot, area) in accessory_slots(handle, options) {
        let (symbol, color) = match slot {
            HandleSlot::Leading(i) => match options.leading.get(i) {
                Some(a) => (glyph(&a.symbol), tint_color(a.tint)),
                None => continue,
            },
            HandleSlot::Trailing(i) => match options.trailing.get(i) {
                Some(a) => (glyph(&a.symbol), tint_color(a.tint)),
                None => continue,
            },
            HandleSlot::MenuButton => (glyph(&options.menu_symbol), Color::White),
        };
        canvas.centered(area, area.y, &symbol.to_string(), color, HANDLE_BG)?;
    }
    Ok(())
}

fn grip(scale: f64) -> String {
    let cells = (GRIP_CELLS * scale).round().max(1.0) as usize;
    "━".repeat(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_have_glyphs() {
        assert_eq!(glyph("tram"), 't');
        assert_eq!(glyph("plus.circle.fill"), '+');
        assert_eq!(glyph("arrow.down.right.and.arrow.up.left"), '↔');
        assert_eq!(glyph("star"), 'S');
        assert_eq!(glyph(""), '?');
    }

    #[test]
    fn grip_narrows_while_held() {
        assert_eq!(grip(1.0).chars().count(), 6);
        assert_eq!(grip(0.9).chars().count(), 5);
    }
}
