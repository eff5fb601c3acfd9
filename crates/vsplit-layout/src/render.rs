#![forbid(unsafe_code)]

//! Pure mapping from split state to a presentation frame.
//!
//! [`render`] turns a [`SplitState`] snapshot into a [`SplitFrame`]: pane
//! heights, how far each pane is collapsed toward its mini overlay, rubber-band
//! stretch from overscroll, and where the handle sits. It allocates only the
//! handle title and never mutates anything, so hosts may call it every frame.
//!
//! Heights and offsets are in host units. Handle offsets are measured from
//! the vertical center of the usable area. [`layout_rects`] rounds a frame
//! onto terminal cells.

use vsplit_core::geometry::Rect;

use crate::accessory::SplitOptions;
use crate::config::SplitConfig;
use crate::geometry::SplitGeometry;
use crate::partition::PartitionController;

/// Overscroll divisor applied to pane heights and the free-floating handle.
const OVERSCROLL_FOLLOW: f64 = 5.0;
/// Overscroll divisor for the rubber-band stretch scale.
const STRETCH_DIVISOR: f64 = 800.0;
/// Content scale lost at full collapse.
const COLLAPSE_SCALE: f64 = 0.15;
/// Blur radius at full collapse.
const COLLAPSE_BLUR: f64 = 8.0;
const HANDLE_PADDING: f64 = 24.0;
const PILL_PADDING: f64 = 12.0;
/// Grabber scale while a drag is in progress.
const GRABBER_PRESSED: f64 = 0.9;

/// Snapshot of everything rendering depends on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplitState {
    pub partition: f64,
    pub overscroll: f64,
    pub hide_top: bool,
    pub hide_bottom: bool,
    pub menu_open: bool,
    pub dragging: bool,
}

impl SplitState {
    /// Capture the controller's current state.
    #[must_use]
    pub fn capture(controller: &PartitionController, menu_open: bool) -> Self {
        Self {
            partition: controller.partition(),
            overscroll: controller.overscroll(),
            hide_top: controller.hide_top(),
            hide_bottom: controller.hide_bottom(),
            menu_open,
            dragging: controller.is_dragging(),
        }
    }

    #[must_use]
    pub const fn is_minimized(&self) -> bool {
        self.hide_top || self.hide_bottom
    }
}

/// Static inputs of [`render`].
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub geometry: &'a SplitGeometry,
    pub config: &'a SplitConfig,
    pub options: &'a SplitOptions,
}

/// Presentation of one pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneFrame {
    pub height: f64,
    /// 0 when collapsed to the collar, 1 when fully expanded.
    pub minimise: f64,
    /// Opacity of the background wash over collapsed content.
    pub overlay_opacity: f64,
    pub content_scale: f64,
    pub blur: f64,
    /// The other pane is hidden and this one fills the area.
    pub is_full: bool,
    /// Rubber-band scale from overscroll.
    pub stretch: f64,
}

/// Presentation of the drag handle.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleFrame {
    /// Vertical offset of the handle center from the middle of the area.
    pub offset: f64,
    pub height: f64,
    pub title: String,
    /// Rendered as a compact pill showing the hidden pane's title.
    pub pill: bool,
    pub horizontal_padding: f64,
    /// Scale of the grabber bar; it shrinks while held.
    pub grabber_scale: f64,
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitFrame {
    pub top: Option<PaneFrame>,
    pub bottom: Option<PaneFrame>,
    pub handle: HandleFrame,
    pub menu_open: bool,
    /// Gap between the panes (doubled while the menu is open).
    pub spacing: f64,
}

/// Build the frame for `state`.
#[must_use]
pub fn render(state: &SplitState, cx: &RenderContext<'_>) -> SplitFrame {
    let config = cx.config;
    let collar = config.collar;
    let spacing = if state.menu_open {
        config.spacing * 2.0
    } else {
        config.spacing
    };
    let menu_lift = if state.menu_open {
        config.spacing / 2.0
    } else {
        0.0
    };
    let usable = cx.geometry.usable_height();
    let card = cx.geometry.card_height_with_spacing(spacing);
    let top_height = card + state.partition;
    let minimized = state.is_minimized();

    let top_frame_height = if state.hide_bottom {
        usable
    } else {
        non_negative(top_height + state.overscroll / OVERSCROLL_FOLLOW)
    };

    let top = (!state.hide_top).then(|| {
        let minimise = ratio((top_height.min(collar * 2.0) + menu_lift - collar) / collar);
        pane(
            top_frame_height,
            minimise,
            state.hide_bottom,
            1.0 + (state.overscroll / STRETCH_DIVISOR).min(0.0),
        )
    });

    let bottom = (!state.hide_bottom).then(|| {
        let lifted = (state.partition - card + collar * 2.0 - menu_lift).max(0.0);
        let minimise = ratio(1.0 - lifted / collar);
        let height = if state.hide_top {
            usable
        } else {
            non_negative(usable - spacing - top_frame_height)
        };
        pane(
            height,
            minimise,
            state.hide_top,
            1.0 - (state.overscroll / STRETCH_DIVISOR).max(0.0),
        )
    });

    let pill_base = if state.hide_top {
        -collar + config.mini_adjust_inset
    } else if state.hide_bottom {
        collar - config.mini_adjust_inset - cx.geometry.bottom_extra_offset()
    } else {
        0.0
    };
    let follow = if minimized { 1.0 } else { OVERSCROLL_FOLLOW };
    let title = if minimized {
        if state.hide_top {
            &cx.options.top_title
        } else {
            &cx.options.bottom_title
        }
    } else if top_height < card {
        &cx.options.top_title
    } else {
        &cx.options.bottom_title
    };

    let handle = HandleFrame {
        offset: pill_base + state.partition + state.overscroll / follow,
        height: if minimized { config.pill_height } else { spacing },
        title: title.clone(),
        pill: minimized,
        horizontal_padding: if minimized {
            PILL_PADDING
        } else {
            HANDLE_PADDING + (state.overscroll / 20.0).abs()
        },
        grabber_scale: if state.dragging { GRABBER_PRESSED } else { 1.0 },
    };

    SplitFrame {
        top,
        bottom,
        handle,
        menu_open: state.menu_open,
        spacing,
    }
}

fn pane(height: f64, minimise: f64, is_full: bool, stretch: f64) -> PaneFrame {
    PaneFrame {
        height,
        minimise,
        overlay_opacity: 1.0 - minimise,
        content_scale: 1.0 - (1.0 - minimise) * COLLAPSE_SCALE,
        blur: (1.0 - minimise) * COLLAPSE_BLUR,
        is_full,
        stretch: if is_full { 1.0 } else { stretch },
    }
}

fn ratio(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(0.0, 1.0)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Cell rectangles of a frame laid onto a terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRects {
    pub top: Option<Rect>,
    pub handle: Rect,
    pub bottom: Option<Rect>,
}

/// Round a frame onto terminal cells (one host unit per row).
///
/// A hidden pane gets no rectangle and the visible one spans the whole area;
/// the pill handle is then drawn over it.
#[must_use]
pub fn layout_rects(frame: &SplitFrame, area: Rect) -> SplitRects {
    let rows = f64::from(area.height);
    let handle_rows = (frame.handle.height.round().max(1.0)).min(rows);
    let center = rows / 2.0 + frame.handle.offset;
    let handle_top = (center - handle_rows / 2.0).round().clamp(0.0, rows - handle_rows);
    let handle_top = handle_top as u16;
    let handle_rows = handle_rows as u16;
    let handle = area.row_band(handle_top, handle_rows);

    let top = frame.top.map(|pane| {
        if pane.is_full {
            area
        } else {
            area.row_band(0, handle_top)
        }
    });
    let bottom = frame.bottom.map(|pane| {
        if pane.is_full {
            area
        } else {
            let start = handle_top.saturating_add(handle_rows);
            area.row_band(start, area.height.saturating_sub(start))
        }
    });

    SplitRects {
        top,
        handle,
        bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        geometry: SplitGeometry,
        config: SplitConfig,
        options: SplitOptions,
    }

    impl Fixture {
        fn new() -> Self {
            let config = SplitConfig::default();
            Self {
                geometry: SplitGeometry::from_card_height(300.0, &config),
                config,
                options: SplitOptions::new("Map", "Places"),
            }
        }

        fn render(&self, state: SplitState) -> SplitFrame {
            render(
                &state,
                &RenderContext {
                    geometry: &self.geometry,
                    config: &self.config,
                    options: &self.options,
                },
            )
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn even_split_fills_both_panes() {
        let fx = Fixture::new();
        let frame = fx.render(SplitState::default());
        let top = frame.top.expect("top visible");
        let bottom = frame.bottom.expect("bottom visible");
        assert!(close(top.height, 300.0));
        assert!(close(bottom.height, 300.0));
        assert!(close(top.minimise, 1.0));
        assert!(close(bottom.minimise, 1.0));
        assert!(close(top.overlay_opacity, 0.0));
        assert!(close(frame.handle.offset, 0.0));
        assert!(close(frame.handle.height, 36.0));
        assert!(!frame.handle.pill);
        assert_eq!(frame.handle.title, "Places");
    }

    #[test]
    fn top_mini_collapses_top_pane() {
        let fx = Fixture::new();
        let frame = fx.render(SplitState {
            partition: -242.0,
            ..SplitState::default()
        });
        let top = frame.top.expect("top visible");
        assert!(close(top.height, 58.0));
        assert!(close(top.minimise, 0.0));
        assert!(close(top.overlay_opacity, 1.0));
        assert!(close(top.content_scale, 0.85));
        assert_eq!(frame.handle.title, "Map");
    }

    #[test]
    fn bottom_mini_collapses_bottom_pane() {
        let fx = Fixture::new();
        let frame = fx.render(SplitState {
            partition: 242.0,
            ..SplitState::default()
        });
        let bottom = frame.bottom.expect("bottom visible");
        assert!(close(bottom.minimise, 0.0));
        assert!(close(bottom.height, 58.0));
    }

    #[test]
    fn hidden_bottom_shows_pill() {
        let fx = Fixture::new();
        let frame = fx.render(SplitState {
            partition: 242.0,
            hide_bottom: true,
            ..SplitState::default()
        });
        assert!(frame.bottom.is_none());
        let top = frame.top.expect("top visible");
        assert!(top.is_full);
        assert!(close(top.height, 636.0));
        assert!(frame.handle.pill);
        assert!(close(frame.handle.height, 44.0));
        assert!(close(frame.handle.offset, 242.0 + 50.0));
        assert!(close(frame.handle.horizontal_padding, 12.0));
        assert_eq!(frame.handle.title, "Places");
    }

    #[test]
    fn hidden_top_pill_names_top() {
        let fx = Fixture::new();
        let frame = fx.render(SplitState {
            partition: -242.0,
            hide_top: true,
            ..SplitState::default()
        });
        assert!(frame.top.is_none());
        assert!(close(frame.handle.offset, -242.0 - 50.0));
        assert_eq!(frame.handle.title, "Map");
    }

    #[test]
    fn overscroll_stretches_and_follows() {
        let fx = Fixture::new();
        let frame = fx.render(SplitState {
            partition: 242.0,
            overscroll: 40.0,
            dragging: true,
            ..SplitState::default()
        });
        assert!(close(frame.handle.offset, 250.0));
        assert!(close(frame.handle.horizontal_padding, 26.0));
        let bottom = frame.bottom.expect("bottom visible");
        assert!(close(bottom.stretch, 0.95));
        assert!(close(frame.top.expect("top").stretch, 1.0));
        assert!(close(frame.handle.grabber_scale, 0.9));
    }

    #[test]
    fn grabber_shrinks_only_while_dragging() {
        let fx = Fixture::new();
        assert!(close(fx.render(SplitState::default()).handle.grabber_scale, 1.0));
        let held = fx.render(SplitState {
            dragging: true,
            ..SplitState::default()
        });
        assert!(close(held.handle.grabber_scale, 0.9));
    }

    #[test]
    fn menu_doubles_spacing() {
        let fx = Fixture::new();
        let frame = fx.render(SplitState {
            menu_open: true,
            ..SplitState::default()
        });
        assert!(close(frame.spacing, 72.0));
        assert!(close(frame.top.expect("top").height, 282.0));
        assert!(frame.menu_open);
    }

    #[test]
    fn rects_split_terminal_area() {
        let config = SplitConfig {
            collar: 3.0,
            spacing: 1.0,
            pill_height: 1.0,
            mini_adjust_inset: 0.0,
            bottom_extra_offset: 0.0,
            ..SplitConfig::default()
        };
        let geometry = SplitGeometry::from_card_height(9.5, &config);
        let options = SplitOptions::default();
        let cx = RenderContext {
            geometry: &geometry,
            config: &config,
            options: &options,
        };
        let area = Rect::new(0, 0, 40, 20);
        let frame = render(&SplitState::default(), &cx);
        let rects = layout_rects(&frame, area);
        assert_eq!(rects.handle, Rect::new(0, 10, 40, 1));
        assert_eq!(rects.top, Some(Rect::new(0, 0, 40, 10)));
        assert_eq!(rects.bottom, Some(Rect::new(0, 11, 40, 9)));

        let hidden = SplitState {
            partition: geometry.range(),
            hide_bottom: true,
            ..SplitState::default()
        };
        let rects = layout_rects(&render(&hidden, &cx), area);
        assert_eq!(rects.top, Some(area));
        assert!(rects.bottom.is_none());
        assert_eq!(rects.handle.height, 1);
    }

    #[test]
    fn degenerate_geometry_renders_finite() {
        let config = SplitConfig::default();
        let geometry = SplitGeometry::from_card_height(0.0, &config);
        let options = SplitOptions::default();
        let frame = render(
            &SplitState::default(),
            &RenderContext {
                geometry: &geometry,
                config: &config,
                options: &options,
            },
        );
        let top = frame.top.expect("top");
        assert!(top.height.is_finite() && top.minimise.is_finite());
        let rects = layout_rects(&frame, Rect::new(0, 0, 10, 0));
        assert!(rects.handle.is_empty());
    }
}
