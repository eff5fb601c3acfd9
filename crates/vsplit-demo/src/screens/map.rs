#![forbid(unsafe_code)]

//! Walking directions over a street map.

use std::io::{self, Write};

use crossterm::style::Color;
use vsplit::{Detent, PaneFrame, Rect, SplitAccessory, SplitOptions, Tint};

use super::Screen;
use crate::canvas::{Canvas, DIM, shade};

const STEPS: &[(&str, &str)] = &[
    ("Walk to South Kensington Museums stop", "4 min"),
    ("Board bus 14 toward Putney Heath", "2 stops"),
    ("Get off at Fulham Broadway", "6 min"),
    ("Walk north on Harwood Road", "3 min"),
    ("Arrive at Parsons Green", ""),
];

const STREET: Color = Color::Rgb {
    r: 210,
    g: 205,
    b: 190,
};
const BLOCK: Color = Color::Rgb {
    r: 90,
    g: 130,
    b: 90,
};
const ROUTE: Color = Color::Rgb {
    r: 70,
    g: 140,
    b: 255,
};

pub struct MapScreen;

impl MapScreen {
    /// Map cell at `(col, row)` of a pane `height` rows tall.
    fn cell(col: u16, row: u16, height: u16) -> (char, Color) {
        let avenue = col % 10 == 0;
        let street = row % 4 == 0;
        let route_col = 3 * row;
        let on_route = route_col.abs_diff(col) <= 1 && row < height;
        match (on_route, avenue, street) {
            (true, ..) => ('●', ROUTE),
            (false, true, true) => ('┼', STREET),
            (false, true, false) => ('│', STREET),
            (false, false, true) => ('─', STREET),
            (false, false, false) => ('·', BLOCK),
        }
    }
}

impl Screen for MapScreen {
    fn title(&self) -> &'static str {
        "Maps"
    }

    fn options(&self) -> SplitOptions {
        let gray = Tint::rgb(142, 142, 147);
        SplitOptions::new("Map", "Directions")
            .leading_accessories(vec![
                SplitAccessory::new("figure.walk").tint(gray),
                SplitAccessory::new("car").tint(gray),
                SplitAccessory::new("tram"),
            ])
            .trailing_accessories(vec![
                SplitAccessory::new("mountain.2.fill"),
                SplitAccessory::new("arrow.up.circle.fill"),
            ])
    }

    fn initial_detent(&self) -> Detent {
        Detent::BottomMini
    }

    fn draw_top(
        &self,
        canvas: &mut Canvas<&mut dyn Write>,
        area: Rect,
        pane: &PaneFrame,
    ) -> io::Result<()> {
        // Blur has no cell equivalent; dim instead.
        let brightness = 1.0 - pane.blur / 16.0;
        let mut row_cells = Vec::with_capacity(usize::from(area.width));
        for row in 0..area.height {
            row_cells.clear();
            row_cells.extend((0..area.width).map(|col| {
                let (ch, color) = Self::cell(col, row, area.height);
                (ch, shade(color, brightness))
            }));
            canvas.cells(area.x, area.y + row, &row_cells)?;
        }
        Ok(())
    }

    fn draw_bottom(
        &self,
        canvas: &mut Canvas<&mut dyn Write>,
        area: Rect,
        _pane: &PaneFrame,
    ) -> io::Result<()> {
        let inner = Rect::new(area.x + 2, area.y + 1, area.width.saturating_sub(4), area.height);
        canvas.text(inner.x, inner.y, inner.width, "Directions", Color::White, Color::Reset)?;
        for (i, (step, detail)) in STEPS.iter().enumerate() {
            let Ok(i) = u16::try_from(i) else { break };
            let y = inner.y + 2 + i * 2;
            if y >= area.bottom() {
                break;
            }
            canvas.text(inner.x, y, 3, &format!("{}.", i + 1), DIM, Color::Reset)?;
            canvas.text(
                inner.x + 3,
                y,
                inner.width.saturating_sub(3),
                step,
                Color::White,
                Color::Reset,
            )?;
            if !detail.is_empty() && y + 1 < area.bottom() {
                canvas.text(inner.x + 3, y + 1, inner.width, detail, DIM, Color::Reset)?;
            }
        }
        Ok(())
    }

    fn top_overlay(&self) -> &str {
        "7 stops · 10 min walk · in 12 min"
    }

    fn bottom_overlay(&self) -> &str {
        "Walk to South Kensington Museums stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_starts_top_left() {
        assert_eq!(MapScreen::cell(0, 0, 10).0, '●');
        assert_eq!(MapScreen::cell(9, 3, 10).0, '●');
    }

    #[test]
    fn street_grid() {
        assert_eq!(MapScreen::cell(20, 8, 5).0, '┼');
        assert_eq!(MapScreen::cell(20, 1, 10).0, '│');
        assert_eq!(MapScreen::cell(15, 4, 10).0, '─');
        assert_eq!(MapScreen::cell(15, 1, 10).0, '·');
    }

    #[test]
    fn options_validate() {
        let options = MapScreen.options();
        assert_eq!(options.validate(), Ok(()));
        assert_eq!(options.leading_count(), 3);
        assert!(!options.has_menu());
    }
}
