#![forbid(unsafe_code)]

//! Demo screens: content hosted in the two panes of a split.

mod map;
mod photo;

use std::io::{self, Write};

use vsplit::{Detent, Observable, PaneFrame, Rect, SplitOptions, SplitRects, SplitSignal};

use crate::canvas::Canvas;

pub use map::MapScreen;
pub use photo::PhotoScreen;

/// Content for one split.
pub trait Screen {
    fn title(&self) -> &'static str;

    /// Accessories, menu and pane titles of this screen's split.
    fn options(&self) -> SplitOptions;

    fn initial_detent(&self) -> Detent;

    fn draw_top(&self, canvas: &mut Canvas<&mut dyn Write>, area: Rect, pane: &PaneFrame)
    -> io::Result<()>;

    fn draw_bottom(
        &self,
        canvas: &mut Canvas<&mut dyn Write>,
        area: Rect,
        pane: &PaneFrame,
    ) -> io::Result<()>;

    /// Text shown over the top pane while it is collapsed to its collar.
    fn top_overlay(&self) -> &str;

    fn bottom_overlay(&self) -> &str;

    /// React to an accessory or menu action of the split.
    fn on_signal(&mut self, _signal: &SplitSignal, _binding: &Observable<Detent>) {}

    /// A press or drag the split did not consume. Returns `true` if handled.
    fn on_pointer(&mut self, _x: u16, _y: u16, _rects: &SplitRects) -> bool {
        false
    }
}

#[must_use]
pub fn all() -> Vec<Box<dyn Screen>> {
    vec![Box::new(MapScreen), Box::new(PhotoScreen::default())]
}
