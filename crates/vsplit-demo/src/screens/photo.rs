#![forbid(unsafe_code)]

//! Photo editor: an adjustable picture on top, sliders below.

use std::io::{self, Write};

use crossterm::style::Color;
use vsplit::{
    Detent, MenuAccessory, Observable, PaneFrame, Rect, SplitAccessory, SplitOptions, SplitRects,
    SplitSignal,
};

use super::Screen;
use crate::canvas::{Canvas, DIM};

const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
const RESET_SYMBOL: &str = "arrow.counterclockwise.circle.fill";
const SLIDER_ROWS: u16 = 3;

fn markup() -> MenuAccessory {
    MenuAccessory::new("pencil.tip.crop.circle").title("Markup")
}

fn fill() -> MenuAccessory {
    MenuAccessory::new("arrow.up.left.and.arrow.down.right").title("Fill")
}

fn auto() -> MenuAccessory {
    MenuAccessory::new("wand.and.stars").title("Auto")
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Adjustments {
    saturation: f64,
    contrast: f64,
    shadows: f64,
    rotate: f64,
}

impl Adjustments {
    const NEUTRAL: Self = Self {
        saturation: 0.5,
        contrast: 0.5,
        shadows: 0.5,
        rotate: 0.5,
    };
    const AUTO: Self = Self {
        saturation: 0.65,
        contrast: 0.55,
        shadows: 0.8,
        rotate: 0.46,
    };

    fn get_mut(&mut self, index: usize) -> Option<&mut f64> {
        match index {
            0 => Some(&mut self.saturation),
            1 => Some(&mut self.contrast),
            2 => Some(&mut self.shadows),
            3 => Some(&mut self.rotate),
            _ => None,
        }
    }

    fn sliders(&self) -> [(&'static str, f64, String); 4] {
        let centered = |v: f64| format!("{:.1}", v * 2.0 - 1.0);
        [
            ("Saturation", self.saturation, centered(self.saturation)),
            ("Contrast", self.contrast, centered(self.contrast)),
            ("Shadows", self.shadows, centered(self.shadows)),
            (
                "Straighten",
                self.rotate,
                format!("{:.1}", self.rotate * 10.0 - 5.0),
            ),
        ]
    }
}

#[derive(Debug)]
pub struct PhotoScreen {
    adjust: Adjustments,
    filled: bool,
    auto: bool,
}

impl Default for PhotoScreen {
    fn default() -> Self {
        Self {
            adjust: Adjustments::NEUTRAL,
            filled: false,
            auto: false,
        }
    }
}

impl PhotoScreen {
    /// Luminance and base color of the scene at normalized `(u, v)`.
    fn scene(u: f64, v: f64) -> (f64, [f64; 3]) {
        let horizon = 0.45;
        let cliff_top = horizon - (u - 0.55) * 0.6;
        if (0.78..=0.80).contains(&u) && (0.16..cliff_top).contains(&v) {
            (0.95, [240.0, 240.0, 235.0])
        } else if u > 0.55 && v >= cliff_top {
            (0.35, [80.0, 110.0, 60.0])
        } else if v < horizon {
            (0.9 - v, [120.0, 170.0, 230.0])
        } else {
            (0.45 + (v - horizon) * 0.3, [40.0, 90.0, 140.0])
        }
    }

    fn pixel(&self, u: f64, v: f64) -> (char, Color) {
        let a = &self.adjust;
        let angle = a.rotate * 10.0 - 5.0;
        let zoom = 1.0 + (a.rotate - 0.5).abs();
        let u = (u - 0.5) / zoom + 0.5 + (v - 0.5) * angle / 40.0;
        let v = (v - 0.5) / zoom + 0.5;
        let (lum, rgb) = Self::scene(u, v);

        let lum = ((lum - 0.5) * a.contrast * 2.0 + 0.5 + (a.shadows * 2.0 - 1.0) / 10.0)
            .clamp(0.0, 1.0);
        let index = ((lum * (RAMP.len() - 1) as f64).round() as usize).min(RAMP.len() - 1);

        let gray = (rgb[0] + rgb[1] + rgb[2]) / 3.0;
        let brightness = 0.4 + 0.6 * lum;
        let channel = |c: f64| {
            ((gray + (c - gray) * a.saturation * 2.0) * brightness).clamp(0.0, 255.0) as u8
        };
        (
            RAMP[index],
            Color::Rgb {
                r: channel(rgb[0]),
                g: channel(rgb[1]),
                b: channel(rgb[2]),
            },
        )
    }

    /// Picture bounds inside `area`: full width when filled, roughly 3:2
    /// (in square units) otherwise.
    fn picture(&self, area: Rect) -> Rect {
        if self.filled {
            return area;
        }
        let width = area.width.min(area.height.saturating_mul(3));
        Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
    }

    fn slider_area(area: Rect) -> Rect {
        Rect::new(
            area.x + 2,
            area.y + 1,
            area.width.saturating_sub(4),
            area.height.saturating_sub(1),
        )
    }
}

impl Screen for PhotoScreen {
    fn title(&self) -> &'static str {
        "Photo"
    }

    fn options(&self) -> SplitOptions {
        SplitOptions::new("Photo", "Controls")
            .leading_accessories(vec![
                SplitAccessory::new("arrow.uturn.backward.circle.fill"),
                SplitAccessory::new("arrow.uturn.forward.circle.fill"),
            ])
            .trailing_accessories(vec![SplitAccessory::new(RESET_SYMBOL)])
            .menu_accessories(
                vsplit::layout::accessory::DEFAULT_MENU_SYMBOL,
                vec![markup(), fill(), auto()],
            )
            .debug(true)
    }

    fn initial_detent(&self) -> Detent {
        Detent::TopFull
    }

    fn draw_top(
        &self,
        canvas: &mut Canvas<&mut dyn Write>,
        area: Rect,
        _pane: &PaneFrame,
    ) -> io::Result<()> {
        let picture = self.picture(area);
        if picture.is_empty() {
            return Ok(());
        }
        let w = f64::from(picture.width);
        let h = f64::from(picture.height);
        let mut row = Vec::with_capacity(usize::from(picture.width));
        for y in 0..picture.height {
            row.clear();
            row.extend((0..picture.width).map(|x| {
                self.pixel((f64::from(x) + 0.5) / w, (f64::from(y) + 0.5) / h)
            }));
            canvas.cells(picture.x, picture.y + y, &row)?;
        }
        Ok(())
    }

    fn draw_bottom(
        &self,
        canvas: &mut Canvas<&mut dyn Write>,
        area: Rect,
        _pane: &PaneFrame,
    ) -> io::Result<()> {
        let inner = Self::slider_area(area);
        if inner.width < 2 {
            return Ok(());
        }
        for (i, (title, value, label)) in (0u16..).zip(self.adjust.sliders()) {
            let y = inner.y + i * SLIDER_ROWS;
            if y + 1 >= area.bottom() {
                break;
            }
            canvas.text(inner.x, y, inner.width, title, Color::White, Color::Reset)?;
            let label_len = u16::try_from(label.len()).unwrap_or(0).min(inner.width);
            canvas.text(
                inner.right() - label_len,
                y,
                label_len,
                &label,
                Color::White,
                Color::Reset,
            )?;

            let filled = (value * f64::from(inner.width - 1)).round() as u16;
            let bar: String = (0..inner.width)
                .map(|x| match x.cmp(&filled) {
                    std::cmp::Ordering::Less => '━',
                    std::cmp::Ordering::Equal => '●',
                    std::cmp::Ordering::Greater => '─',
                })
                .collect();
            canvas.text(inner.x, y + 1, inner.width, &bar, DIM, Color::Reset)?;
        }
        Ok(())
    }

    fn top_overlay(&self) -> &str {
        "▣ Photo"
    }

    fn bottom_overlay(&self) -> &str {
        "◎ Controls"
    }

    fn on_signal(&mut self, signal: &SplitSignal, binding: &Observable<Detent>) {
        match signal {
            SplitSignal::AccessoryTapped { id } if *id == SplitAccessory::new(RESET_SYMBOL).id() => {
                self.adjust = Adjustments::NEUTRAL;
                self.auto = false;
            }
            SplitSignal::MenuItemTapped { id } if *id == markup().id() => {
                binding.set(Detent::TopFull);
            }
            SplitSignal::MenuItemTapped { id } if *id == fill().id() => {
                self.filled = !self.filled;
            }
            SplitSignal::MenuItemTapped { id } if *id == auto().id() => {
                self.adjust = if self.auto {
                    Adjustments::NEUTRAL
                } else {
                    Adjustments::AUTO
                };
                self.auto = !self.auto;
            }
            _ => {}
        }
    }

    fn on_pointer(&mut self, x: u16, y: u16, rects: &SplitRects) -> bool {
        let Some(bottom) = rects.bottom else {
            return false;
        };
        if !bottom.contains(x, y) || y < rects.handle.bottom() {
            return false;
        }
        let inner = Self::slider_area(bottom);
        if inner.width < 2 || y < inner.y {
            return false;
        }
        let offset = y - inner.y;
        if offset % SLIDER_ROWS != 1 {
            return false;
        }
        let Some(slot) = self.adjust.get_mut(usize::from(offset / SLIDER_ROWS)) else {
            return false;
        };
        let along = f64::from(x.saturating_sub(inner.x)) / f64::from(inner.width - 1);
        *slot = along.clamp(0.0, 1.0);
        true
    }
}
