#![forbid(unsafe_code)]

//! Drag recognition: transforms raw pointer events into semantic events.
//!
//! [`GestureRecognizer`] watches mouse-down → drag → mouse-up sequences and
//! emits `DragStart` / `DragMove` / `DragEnd`, or a `Click` when the pointer
//! never crossed the drag threshold.
//!
//! # Invariants
//!
//! 1. Drag and Click never both emit for the same press/release pair.
//! 2. `DragCancel` is emitted if Escape is pressed or focus is lost while a
//!    drag is in progress; the following mouse-up is then swallowed.
//! 3. After `reset()`, the recognizer is idle and emits nothing for a
//!    dangling mouse-up.

use crate::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crate::semantic_event::{Position, SemanticEvent};

/// Thresholds for gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Minimum manhattan distance (cells) before a drag starts (default: 0,
    /// any movement with the button held is a drag).
    pub drag_threshold: u16,
    /// Only the left button starts drags (default: true).
    pub primary_only: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 0,
            primary_only: true,
        }
    }
}

/// Tracks an ongoing or potential drag.
#[derive(Debug, Clone, Copy)]
struct DragTracker {
    start_pos: Position,
    button: MouseButton,
    last_pos: Position,
    started: bool,
}

/// Stateful recognizer that transforms raw events into semantic drag events.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    drag: Option<DragTracker>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    /// Create a new gesture recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self { config, drag: None }
    }

    /// Process a raw event, returning any semantic events produced.
    ///
    /// The first qualifying movement yields both `DragStart` and `DragMove`.
    pub fn process(&mut self, event: &Event) -> Vec<SemanticEvent> {
        let mut out = Vec::with_capacity(2);

        match event {
            Event::Mouse(mouse) => {
                let pos = Position::new(mouse.x, mouse.y);
                match mouse.kind {
                    MouseEventKind::Down(button) if self.accepts(button) => {
                        // A press without the release of the previous drag
                        // (lost mouse-up) abandons that drag.
                        self.cancel(&mut out);
                        self.drag = Some(DragTracker {
                            start_pos: pos,
                            button,
                            last_pos: pos,
                            started: false,
                        });
                    }
                    MouseEventKind::Drag(button) if self.accepts(button) => {
                        self.on_mouse_drag(pos, button, &mut out);
                    }
                    MouseEventKind::Up(button) if self.accepts(button) => {
                        self.on_mouse_up(pos, &mut out);
                    }
                    _ => {}
                }
            }
            Event::Key(key) if key.kind == KeyEventKind::Press && key.code == KeyCode::Escape => {
                self.cancel(&mut out);
            }
            Event::Focus(false) => self.cancel(&mut out),
            _ => {}
        }

        out
    }

    /// Whether a drag is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(|d| d.started)
    }

    /// Where the current press started, if a button is held.
    #[must_use]
    pub fn press_origin(&self) -> Option<Position> {
        self.drag.as_ref().map(|d| d.start_pos)
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.drag = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    fn accepts(&self, button: MouseButton) -> bool {
        !self.config.primary_only || button == MouseButton::Left
    }

    fn on_mouse_drag(&mut self, pos: Position, button: MouseButton, out: &mut Vec<SemanticEvent>) {
        let Some(ref mut drag) = self.drag else {
            // Drag without a prior mouse-down: start tracking from here.
            self.drag = Some(DragTracker {
                start_pos: pos,
                button,
                last_pos: pos,
                started: false,
            });
            return;
        };

        if !drag.started
            && drag.start_pos.manhattan_distance(pos) >= u32::from(self.config.drag_threshold)
        {
            drag.started = true;
            #[cfg(feature = "tracing")]
            tracing::trace!(x = drag.start_pos.x, y = drag.start_pos.y, "drag started");
            out.push(SemanticEvent::DragStart {
                pos: drag.start_pos,
                button: drag.button,
            });
        }

        if drag.started {
            let delta = (
                i32::from(pos.x) - i32::from(drag.last_pos.x),
                i32::from(pos.y) - i32::from(drag.last_pos.y),
            );
            out.push(SemanticEvent::DragMove {
                start: drag.start_pos,
                current: pos,
                delta,
            });
        }

        drag.last_pos = pos;
    }

    fn on_mouse_up(&mut self, pos: Position, out: &mut Vec<SemanticEvent>) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.started {
            #[cfg(feature = "tracing")]
            tracing::trace!(rows = pos.rows_from(drag.start_pos), "drag ended");
            out.push(SemanticEvent::DragEnd {
                start: drag.start_pos,
                end: pos,
            });
        } else {
            out.push(SemanticEvent::Click {
                pos,
                button: drag.button,
            });
        }
    }

    fn cancel(&mut self, out: &mut Vec<SemanticEvent>) {
        if let Some(drag) = self.drag.take()
            && drag.started
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("drag cancelled");
            out.push(SemanticEvent::DragCancel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyEvent, MouseEvent};

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(kind, x, y))
    }

    fn down(x: u16, y: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    fn drag(x: u16, y: u16) -> Event {
        mouse(MouseEventKind::Drag(MouseButton::Left), x, y)
    }

    fn up(x: u16, y: u16) -> Event {
        mouse(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    #[test]
    fn press_release_is_click() {
        let mut gr = GestureRecognizer::default();
        assert!(gr.process(&down(5, 5)).is_empty());
        let events = gr.process(&up(5, 5));
        assert_eq!(
            events,
            vec![SemanticEvent::Click {
                pos: Position::new(5, 5),
                button: MouseButton::Left
            }]
        );
    }

    #[test]
    fn first_move_emits_start_and_move() {
        let mut gr = GestureRecognizer::default();
        gr.process(&down(3, 10));
        let events = gr.process(&drag(3, 8));
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SemanticEvent::DragStart { .. }));
        assert_eq!(events[1].vertical_translation(), Some(-2));
        assert!(gr.is_dragging());
    }

    #[test]
    fn deltas_are_relative_to_previous_move() {
        let mut gr = GestureRecognizer::default();
        gr.process(&down(0, 10));
        gr.process(&drag(0, 12));
        let events = gr.process(&drag(0, 15));
        assert_eq!(
            events,
            vec![SemanticEvent::DragMove {
                start: Position::new(0, 10),
                current: Position::new(0, 15),
                delta: (0, 3),
            }]
        );
    }

    #[test]
    fn release_after_drag_is_drag_end_not_click() {
        let mut gr = GestureRecognizer::default();
        gr.process(&down(0, 10));
        gr.process(&drag(0, 4));
        let events = gr.process(&up(0, 4));
        assert_eq!(
            events,
            vec![SemanticEvent::DragEnd {
                start: Position::new(0, 10),
                end: Position::new(0, 4),
            }]
        );
        assert!(!gr.is_dragging());
    }

    #[test]
    fn threshold_delays_drag_start() {
        let mut gr = GestureRecognizer::new(GestureConfig {
            drag_threshold: 3,
            ..GestureConfig::default()
        });
        gr.process(&down(0, 10));
        assert!(gr.process(&drag(0, 11)).is_empty());
        let events = gr.process(&drag(0, 13));
        assert!(matches!(events[0], SemanticEvent::DragStart { .. }));
    }

    #[test]
    fn escape_cancels_and_swallows_release() {
        let mut gr = GestureRecognizer::default();
        gr.process(&down(0, 10));
        gr.process(&drag(0, 6));
        let events = gr.process(&Event::Key(KeyEvent::new(KeyCode::Escape)));
        assert_eq!(events, vec![SemanticEvent::DragCancel]);
        assert!(gr.process(&up(0, 6)).is_empty());
    }

    #[test]
    fn focus_loss_cancels_drag() {
        let mut gr = GestureRecognizer::default();
        gr.process(&down(0, 10));
        gr.process(&drag(0, 9));
        assert_eq!(
            gr.process(&Event::Focus(false)),
            vec![SemanticEvent::DragCancel]
        );
    }

    #[test]
    fn secondary_button_ignored_by_default() {
        let mut gr = GestureRecognizer::default();
        gr.process(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0));
        assert!(gr.press_origin().is_none());
        assert!(
            gr.process(&mouse(MouseEventKind::Up(MouseButton::Right), 0, 0))
                .is_empty()
        );
    }

    #[test]
    fn press_during_drag_cancels_it() {
        let mut gr = GestureRecognizer::default();
        gr.process(&down(0, 10));
        gr.process(&drag(0, 5));
        assert_eq!(gr.process(&down(0, 5)), vec![SemanticEvent::DragCancel]);
        assert!(!gr.is_dragging());
        assert_eq!(gr.press_origin(), Some(Position::new(0, 5)));
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut gr = GestureRecognizer::default();
        gr.process(&down(0, 10));
        gr.process(&drag(0, 2));
        gr.reset();
        assert!(!gr.is_dragging());
        assert!(gr.process(&up(0, 2)).is_empty());
    }
}
