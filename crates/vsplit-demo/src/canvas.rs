#![forbid(unsafe_code)]

//! Cell drawing on top of crossterm's queued commands.
//!
//! Nothing is flushed here; the caller brackets a frame with a synchronized
//! update and flushes once.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use vsplit::{Rect, Tint};

pub const HANDLE_BG: Color = Color::Rgb {
    r: 40,
    g: 40,
    b: 44,
};
pub const DIM: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 128,
};

#[must_use]
pub const fn tint_color(tint: Tint) -> Color {
    Color::Rgb {
        r: tint.r,
        g: tint.g,
        b: tint.b,
    }
}

/// Scale an RGB color toward black; other colors pass through.
#[must_use]
pub fn shade(color: Color, factor: f64) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    match color {
        Color::Rgb { r, g, b } => {
            let scale = |c: u8| (f64::from(c) * factor).round() as u8;
            Color::Rgb {
                r: scale(r),
                g: scale(g),
                b: scale(b),
            }
        }
        other => other,
    }
}

pub struct Canvas<W: Write> {
    out: W,
}

impl<W: Write> Canvas<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Paint every cell of `area` with `ch`.
    pub fn fill(&mut self, area: Rect, ch: char, fg: Color, bg: Color) -> io::Result<()> {
        if area.is_empty() {
            return Ok(());
        }
        let line: String = std::iter::repeat_n(ch, usize::from(area.width)).collect();
        queue!(self.out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
        for y in area.y..area.bottom() {
            queue!(self.out, MoveTo(area.x, y), Print(&line))?;
        }
        queue!(self.out, ResetColor)
    }

    /// Print `text` at `(x, y)`, clipped to `max` cells.
    pub fn text(
        &mut self,
        x: u16,
        y: u16,
        max: u16,
        text: &str,
        fg: Color,
        bg: Color,
    ) -> io::Result<()> {
        let clipped: String = text.chars().take(usize::from(max)).collect();
        if clipped.is_empty() {
            return Ok(());
        }
        queue!(
            self.out,
            MoveTo(x, y),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(clipped),
            ResetColor
        )
    }

    /// Print `text` horizontally centered in `area` on row `y`.
    pub fn centered(&mut self, area: Rect, y: u16, text: &str, fg: Color, bg: Color) -> io::Result<()> {
        let len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX).min(area.width);
        let x = area.x + (area.width - len) / 2;
        self.text(x, y, len, text, fg, bg)
    }

    /// Print a row of individually colored cells starting at `(x, y)`.
    pub fn cells(&mut self, x: u16, y: u16, cells: &[(char, Color)]) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        let mut current = None;
        for &(ch, color) in cells {
            if current != Some(color) {
                queue!(self.out, SetForegroundColor(color))?;
                current = Some(color);
            }
            queue!(self.out, Print(ch))?;
        }
        queue!(self.out, ResetColor)
    }
}
