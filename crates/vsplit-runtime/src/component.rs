#![forbid(unsafe_code)]

//! The `VerticalSplit` component: binding, controller, menu and input.
//!
//! # Lifecycle
//!
//! ```text
//! new(binding, options, config)
//!   -> set_viewport / set_area           (geometry from the host)
//!   -> loop {
//!        sync_binding()                  (external detent changes)
//!        handle_event(&event)            (terminal hosts)
//!        drag_changed / drag_ended       (pointer hosts)
//!        frame() / rects()               (draw)
//!        drain_signals()                 (feedback, accessory actions)
//!      }
//! ```
//!
//! # Invariants
//!
//! 1. The binding always ends up holding the detent the controller rests at.
//!    External writes that cannot be applied (a drag is in flight, or the
//!    accessory menu is open) are reverted.
//! 2. While the menu is open, drags are not started.
//! 3. Signals are delivered in emission order.

use std::fmt;

use vsplit_core::event::{Event, KeyCode, KeyEventKind};
use vsplit_core::geometry::Rect;
use vsplit_core::gesture::{GestureConfig, GestureRecognizer};
use vsplit_core::semantic_event::{Position, SemanticEvent};
use vsplit_layout::{
    Detent, PartitionController, RenderContext, SplitConfig, SplitConfigError, SplitFrame,
    SplitGeometry, SplitOptions, SplitOptionsError, SplitRects, SplitSignal, SplitState,
    Viewport, layout_rects, render,
};

use crate::observable::Observable;

/// Width of one accessory button in the handle row, in cells.
pub const ACCESSORY_CELLS: u16 = 3;

/// Rejected component construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitBuildError {
    Config(SplitConfigError),
    Options(SplitOptionsError),
}

impl fmt::Display for SplitBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid split config: {e}"),
            Self::Options(e) => write!(f, "invalid split options: {e}"),
        }
    }
}

impl std::error::Error for SplitBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Options(e) => Some(e),
        }
    }
}

impl From<SplitConfigError> for SplitBuildError {
    fn from(e: SplitConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SplitOptionsError> for SplitBuildError {
    fn from(e: SplitOptionsError) -> Self {
        Self::Options(e)
    }
}

/// A button in the handle row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSlot {
    Leading(usize),
    Trailing(usize),
    MenuButton,
}

/// Cell rectangles of the accessory buttons inside `handle`.
///
/// Leading buttons start at the left edge, trailing buttons end at the right
/// edge with the menu button (if any) last. Buttons that do not fit are
/// omitted.
#[must_use]
pub fn accessory_slots(handle: Rect, options: &SplitOptions) -> Vec<(HandleSlot, Rect)> {
    let mut slots = Vec::with_capacity(options.leading_count() + options.trailing_count());
    let row = Rect::new(handle.x, handle.y, handle.width, handle.height.min(1));
    let fits = |x: u16| x >= handle.x && x.saturating_add(ACCESSORY_CELLS) <= handle.right();

    let mut x = handle.x.saturating_add(1);
    for i in 0..options.leading_count() {
        if fits(x) {
            slots.push((HandleSlot::Leading(i), Rect::new(x, row.y, ACCESSORY_CELLS, row.height)));
        }
        x = x.saturating_add(ACCESSORY_CELLS);
    }

    let mut trailing: Vec<HandleSlot> = (0..options.trailing.len()).map(HandleSlot::Trailing).collect();
    if options.has_menu() {
        trailing.push(HandleSlot::MenuButton);
    }
    let mut right = handle.right().saturating_sub(1);
    for slot in trailing.into_iter().rev() {
        let Some(x) = right.checked_sub(ACCESSORY_CELLS) else {
            break;
        };
        if fits(x) {
            slots.push((slot, Rect::new(x, row.y, ACCESSORY_CELLS, row.height)));
        }
        right = x;
    }
    slots
}

/// Cell rectangles of the menu items, sharing the handle row evenly.
#[must_use]
pub fn menu_slots(handle: Rect, options: &SplitOptions) -> Vec<Rect> {
    let count = u16::try_from(options.menu.len()).unwrap_or(u16::MAX);
    if count == 0 || handle.width == 0 {
        return Vec::new();
    }
    let width = handle.width / count;
    (0..count)
        .map(|i| {
            let x = handle.x.saturating_add(i * width);
            let w = if i + 1 == count {
                handle.right().saturating_sub(x)
            } else {
                width
            };
            Rect::new(x, handle.y, w, handle.height)
        })
        .collect()
}

/// A two-pane vertical split driven by a detent binding.
#[derive(Debug)]
pub struct VerticalSplit {
    binding: Observable<Detent>,
    seen_version: u64,
    controller: PartitionController,
    config: SplitConfig,
    options: SplitOptions,
    viewport: Viewport,
    area: Option<Rect>,
    menu_open: bool,
    gestures: GestureRecognizer,
    routing_drag: bool,
    signals: Vec<SplitSignal>,
}

impl VerticalSplit {
    /// Validate the options and config and rest at the binding's detent.
    ///
    /// Geometry is empty until [`set_viewport`](Self::set_viewport) or
    /// [`set_area`](Self::set_area) is called.
    pub fn new(
        binding: Observable<Detent>,
        options: SplitOptions,
        config: SplitConfig,
    ) -> Result<Self, SplitBuildError> {
        config.validate()?;
        options.validate()?;
        let viewport = Viewport::default();
        let geometry = SplitGeometry::new(viewport, &config);
        let controller = PartitionController::new(config, geometry, binding.get());
        let mut split = Self {
            seen_version: binding.version(),
            binding,
            controller,
            config,
            options,
            viewport,
            area: None,
            menu_open: false,
            gestures: GestureRecognizer::new(GestureConfig::default()),
            routing_drag: false,
            signals: Vec::with_capacity(8),
        };
        split.publish_detent();
        Ok(split)
    }

    #[must_use]
    pub fn binding(&self) -> &Observable<Detent> {
        &self.binding
    }

    #[must_use]
    pub fn controller(&self) -> &PartitionController {
        &self.controller
    }

    #[must_use]
    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    #[must_use]
    pub fn detent(&self) -> Detent {
        self.controller.detent()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Update the host geometry. Deferred until the end of a drag in flight.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let geometry = SplitGeometry::new(viewport, &self.config);
        self.controller.set_geometry(geometry);
    }

    /// Lay the split onto a terminal area, one row per host unit.
    pub fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
        self.set_viewport(Viewport::new(f64::from(area.height)));
    }

    /// Apply an external detent change, if there is one.
    ///
    /// Returns `true` when a new detent was applied.
    pub fn sync_binding(&mut self) -> bool {
        let version = self.binding.version();
        if version == self.seen_version {
            return false;
        }
        self.seen_version = version;
        let requested = self.binding.get();

        if self.controller.is_dragging() || self.menu_open {
            tracing::debug!(
                %requested,
                dragging = self.controller.is_dragging(),
                menu_open = self.menu_open,
                "external detent dropped"
            );
            self.publish_detent();
            return false;
        }

        self.controller.apply_detent(requested);
        self.publish_detent();
        self.collect_signals();
        true
    }

    /// Follow a pointer drag; `translation_y` is measured from the press.
    pub fn drag_changed(&mut self, translation_y: f64) {
        if self.menu_open && !self.controller.is_dragging() {
            return;
        }
        self.controller.on_drag_changed(translation_y);
        self.collect_signals();
    }

    /// Release a pointer drag and commit the resulting detent.
    pub fn drag_ended(&mut self, translation_y: f64) -> Option<Detent> {
        if self.menu_open && !self.controller.is_dragging() {
            return None;
        }
        let committed = self.controller.on_drag_ended(translation_y);
        self.publish_detent();
        self.collect_signals();
        committed
    }

    /// Abandon the drag in flight.
    pub fn cancel_drag(&mut self) {
        self.routing_drag = false;
        self.controller.cancel_drag();
        self.publish_detent();
        self.collect_signals();
    }

    /// Open or close the accessory menu. Returns whether it is now open.
    pub fn toggle_menu(&mut self) -> bool {
        if !self.options.has_menu() || self.controller.is_dragging() {
            return self.menu_open;
        }
        self.set_menu(!self.menu_open);
        self.menu_open
    }

    /// Close the menu (tap on the dimmed area).
    pub fn dismiss_menu(&mut self) {
        if self.menu_open {
            self.set_menu(false);
        }
    }

    /// Tap a leading or trailing accessory. Returns `false` for unknown ids
    /// or while the menu covers the accessory bar.
    pub fn tap_accessory(&mut self, id: &str) -> bool {
        if self.menu_open {
            return false;
        }
        let Some(accessory) = self.options.accessory(id) else {
            tracing::debug!(id, "unknown accessory");
            return false;
        };
        if self.options.debug {
            tracing::info!("Accessory item tapped: {}", accessory.title);
        }
        self.signals.push(SplitSignal::AccessoryTapped { id: id.to_owned() });
        true
    }

    /// Tap a menu item; the menu closes.
    pub fn tap_menu_item(&mut self, id: &str) -> bool {
        if !self.menu_open {
            return false;
        }
        let Some(item) = self.options.menu_item(id) else {
            tracing::debug!(id, "unknown menu item");
            return false;
        };
        if self.options.debug {
            tracing::info!("Menu item tapped: {}", item.title);
        }
        self.menu_open = false;
        self.signals.push(SplitSignal::MenuItemTapped { id: id.to_owned() });
        self.signals.push(SplitSignal::MenuToggled { open: false });
        true
    }

    /// Current presentation.
    #[must_use]
    pub fn frame(&self) -> SplitFrame {
        let state = SplitState::capture(&self.controller, self.menu_open);
        render(
            &state,
            &RenderContext {
                geometry: self.controller.geometry(),
                config: &self.config,
                options: &self.options,
            },
        )
    }

    /// Cell rectangles for the area given to [`set_area`](Self::set_area).
    #[must_use]
    pub fn rects(&self) -> Option<SplitRects> {
        self.area.map(|area| layout_rects(&self.frame(), area))
    }

    /// Take the queued signals in emission order.
    pub fn drain_signals(&mut self) -> std::vec::Drain<'_, SplitSignal> {
        self.collect_signals();
        self.signals.drain(..)
    }

    /// Route a terminal event. Returns `true` if the split consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize { width, height } => {
                let origin = self.area.map_or((0, 0), |a| (a.x, a.y));
                self.set_area(Rect::new(origin.0, origin.1, *width, *height));
                return true;
            }
            Event::Key(key)
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Escape
                    && self.menu_open
                    && !self.routing_drag =>
            {
                self.dismiss_menu();
                return true;
            }
            _ => {}
        }

        let mut consumed = false;
        for semantic in self.gestures.process(event) {
            consumed |= self.on_semantic(semantic);
        }
        consumed
    }

    fn on_semantic(&mut self, event: SemanticEvent) -> bool {
        match event {
            SemanticEvent::DragStart { pos, .. } => {
                self.routing_drag = !self.menu_open && self.handle_contains(pos);
                self.routing_drag
            }
            SemanticEvent::DragMove { start, current, .. } if self.routing_drag => {
                self.drag_changed(f64::from(current.rows_from(start)));
                true
            }
            SemanticEvent::DragEnd { start, end } if self.routing_drag => {
                self.routing_drag = false;
                self.drag_ended(f64::from(end.rows_from(start)));
                true
            }
            SemanticEvent::DragCancel if self.routing_drag => {
                self.cancel_drag();
                true
            }
            SemanticEvent::Click { pos, .. } => self.on_click(pos),
            _ => false,
        }
    }

    fn on_click(&mut self, pos: Position) -> bool {
        let Some(rects) = self.rects() else {
            return false;
        };
        let handle = rects.handle;

        if self.menu_open {
            let hit = menu_slots(handle, &self.options)
                .iter()
                .position(|r| r.contains(pos.x, pos.y));
            match hit.and_then(|i| self.options.menu.get(i)).map(|m| m.id()) {
                Some(id) => {
                    self.tap_menu_item(&id);
                }
                None => self.dismiss_menu(),
            }
            return true;
        }

        if !handle.contains(pos.x, pos.y) {
            return false;
        }
        let hit = accessory_slots(handle, &self.options)
            .into_iter()
            .find(|(_, r)| r.contains(pos.x, pos.y))
            .map(|(slot, _)| slot);
        match hit {
            Some(HandleSlot::Leading(i)) => {
                if let Some(id) = self.options.leading.get(i).map(|a| a.id()) {
                    self.tap_accessory(&id);
                }
            }
            Some(HandleSlot::Trailing(i)) => {
                if let Some(id) = self.options.trailing.get(i).map(|a| a.id()) {
                    self.tap_accessory(&id);
                }
            }
            Some(HandleSlot::MenuButton) => {
                self.toggle_menu();
            }
            None if self.controller.is_minimized() => {
                // A tap on the pill reveals the hidden pane at its collar.
                self.drag_changed(0.0);
                self.drag_ended(0.0);
            }
            None => {}
        }
        true
    }

    fn handle_contains(&self, pos: Position) -> bool {
        self.rects()
            .is_some_and(|r| r.handle.contains(pos.x, pos.y))
    }

    fn set_menu(&mut self, open: bool) {
        self.menu_open = open;
        if self.options.debug {
            if open {
                tracing::info!("Menu opened");
            } else {
                tracing::info!("Menu dismissed");
            }
        }
        self.signals.push(SplitSignal::MenuToggled { open });
    }

    /// Write the controller's detent to the binding without re-applying it.
    fn publish_detent(&mut self) {
        self.binding.set(self.controller.detent());
        self.seen_version = self.binding.version();
    }

    fn collect_signals(&mut self) {
        self.signals.extend(self.controller.drain_signals());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsplit_layout::{MenuAccessory, SplitAccessory};

    fn split_with(options: SplitOptions) -> VerticalSplit {
        let mut split = VerticalSplit::new(
            Observable::new(Detent::default()),
            options,
            SplitConfig::default(),
        )
        .expect("valid split");
        // card height 300
        split.set_viewport(Viewport::new(656.0).with_insets(0.0, 20.0));
        split
    }

    #[test]
    fn menu_slots_saturate_at_the_cell_limit() {
        let options = SplitOptions::new("A", "B").menu_accessories(
            "+",
            vec![MenuAccessory::new("one"), MenuAccessory::new("two")],
        );
        let handle = Rect::new(u16::MAX - 3, 0, 10, 1);
        let slots = menu_slots(handle, &options);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0], Rect::new(u16::MAX - 3, 0, 5, 1));
        assert_eq!(slots[1].x, u16::MAX);
        assert_eq!(slots[1].width, 0);
    }

    fn split() -> VerticalSplit {
        split_with(SplitOptions::new("Map", "Places"))
    }

    #[test]
    fn invalid_options_rejected() {
        let err = VerticalSplit::new(
            Observable::new(Detent::default()),
            SplitOptions::new("", "B"),
            SplitConfig::default(),
        )
        .expect_err("empty title");
        assert!(matches!(err, SplitBuildError::Options(_)));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SplitConfig {
            notch_count: 0,
            ..SplitConfig::default()
        };
        let err = VerticalSplit::new(Observable::default(), SplitOptions::default(), config)
            .expect_err("zero notches");
        assert_eq!(err, SplitBuildError::Config(SplitConfigError::InvalidNotchCount(0)));
    }

    #[test]
    fn external_detent_is_applied() {
        let mut s = split();
        s.binding().set(Detent::TopMini);
        assert!(s.sync_binding());
        assert_eq!(s.controller().partition(), -242.0);
        assert!(!s.sync_binding());
    }

    #[test]
    fn invalid_external_fraction_is_written_back() {
        let mut s = split();
        s.binding().set(Detent::Fraction(3.0));
        s.sync_binding();
        assert_eq!(s.binding().get(), Detent::TopFull);
        assert!(s.controller().hide_bottom());
    }

    #[test]
    fn commit_writes_binding() {
        let mut s = split();
        s.drag_changed(-200.0);
        assert_eq!(s.drag_ended(-200.0), Some(Detent::Fraction(0.0)));
        assert_eq!(s.binding().get(), Detent::Fraction(0.0));
        assert!(!s.sync_binding());
    }

    #[test]
    fn external_write_during_drag_is_dropped() {
        let mut s = split();
        s.drag_changed(40.0);
        s.binding().set(Detent::TopFull);
        assert!(!s.sync_binding());
        assert_eq!(s.binding().get(), Detent::Fraction(0.5));
        assert!(!s.controller().hide_bottom());
        s.drag_ended(40.0);
        assert_eq!(s.detent(), Detent::Fraction(0.5));
    }

    #[test]
    fn menu_blocks_drags_and_external_detents() {
        let mut s = split_with(
            SplitOptions::new("A", "B").menu_accessories("plus", vec![MenuAccessory::new("pin")]),
        );
        assert!(s.toggle_menu());
        s.drag_changed(100.0);
        assert!(!s.is_dragging());
        assert_eq!(s.drag_ended(100.0), None);

        s.binding().set(Detent::BottomMini);
        assert!(!s.sync_binding());
        assert_eq!(s.binding().get(), Detent::Fraction(0.5));
        assert!((s.frame().spacing - 72.0).abs() < 1e-9);

        assert!(s.tap_menu_item("pinpin"));
        assert!(!s.is_menu_open());
        let signals: Vec<_> = s.drain_signals().collect();
        assert!(signals.contains(&SplitSignal::MenuItemTapped {
            id: "pinpin".to_owned()
        }));
        assert_eq!(signals.last(), Some(&SplitSignal::MenuToggled { open: false }));
    }

    #[test]
    fn menu_without_items_never_opens() {
        let mut s = split();
        assert!(!s.toggle_menu());
        assert!(!s.is_menu_open());
    }

    #[test]
    fn accessory_taps_emit_signals() {
        let mut s = split_with(
            SplitOptions::new("A", "B")
                .leading_accessories(vec![SplitAccessory::new("star").title("Fav")]),
        );
        assert!(s.tap_accessory("Favstar"));
        assert!(!s.tap_accessory("nope"));
        let signals: Vec<_> = s.drain_signals().collect();
        assert_eq!(
            signals,
            vec![SplitSignal::AccessoryTapped {
                id: "Favstar".to_owned()
            }]
        );
    }

    #[test]
    fn viewport_change_rederives_partition() {
        let mut s = split();
        s.binding().set(Detent::BottomMini);
        s.sync_binding();
        s.set_viewport(Viewport::new(456.0).with_insets(0.0, 20.0));
        assert_eq!(s.controller().partition(), 142.0);
    }

    #[test]
    fn slots_layout_in_handle_row() {
        let options = SplitOptions::new("A", "B")
            .leading_accessories(vec![SplitAccessory::new("l")])
            .trailing_accessories(vec![SplitAccessory::new("t")])
            .menu_accessories("plus", vec![MenuAccessory::new("m"), MenuAccessory::new("n")]);
        let handle = Rect::new(0, 5, 30, 1);
        let slots = accessory_slots(handle, &options);
        assert_eq!(
            slots,
            vec![
                (HandleSlot::Leading(0), Rect::new(1, 5, 3, 1)),
                (HandleSlot::MenuButton, Rect::new(26, 5, 3, 1)),
                (HandleSlot::Trailing(0), Rect::new(23, 5, 3, 1)),
            ]
        );
        assert_eq!(
            menu_slots(handle, &options),
            vec![Rect::new(0, 5, 15, 1), Rect::new(15, 5, 15, 1)]
        );
    }

    #[test]
    fn slots_that_do_not_fit_are_dropped() {
        let options = SplitOptions::new("A", "B")
            .leading_accessories(vec![SplitAccessory::new("a"), SplitAccessory::new("b")]);
        let slots = accessory_slots(Rect::new(0, 0, 5, 1), &options);
        assert_eq!(slots, vec![(HandleSlot::Leading(0), Rect::new(1, 0, 3, 1))]);
    }
}
