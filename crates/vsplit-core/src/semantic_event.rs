#![forbid(unsafe_code)]

//! Semantic drag events derived from raw pointer input.
//!
//! # Invariants
//! 1. Every drag sequence is well-formed: `DragStart` → zero or more
//!    `DragMove` → `DragEnd` or `DragCancel`.
//! 2. A press/release pair yields either a `Click` or a drag, never both.

use crate::event::MouseButton;

/// A 2D cell position (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// Signed row offset from `origin` to `self` (positive = downwards).
    #[must_use]
    pub fn rows_from(self, origin: Self) -> i32 {
        i32::from(self.y) - i32::from(origin.y)
    }
}

impl From<(u16, u16)> for Position {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// Pointer gestures the split handle reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticEvent {
    /// Press and release without crossing the drag threshold.
    Click { pos: Position, button: MouseButton },

    /// Pointer moved beyond the drag threshold while a button was held.
    DragStart { pos: Position, button: MouseButton },

    /// Ongoing drag movement.
    DragMove {
        start: Position,
        current: Position,
        /// Movement since the previous `DragMove` (dx, dy).
        delta: (i32, i32),
    },

    /// Button released after a drag.
    DragEnd { start: Position, end: Position },

    /// Drag abandoned (Escape pressed, focus lost).
    DragCancel,
}

impl SemanticEvent {
    /// Returns true if this is a drag-related event.
    #[must_use]
    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::DragStart { .. } | Self::DragMove { .. } | Self::DragEnd { .. } | Self::DragCancel
        )
    }

    /// Total vertical translation in rows since the drag started.
    ///
    /// `None` for events that carry no translation.
    #[must_use]
    pub fn vertical_translation(&self) -> Option<i32> {
        match self {
            Self::DragStart { .. } => Some(0),
            Self::DragMove { start, current, .. } => Some(current.rows_from(*start)),
            Self::DragEnd { start, end } => Some(end.rows_from(*start)),
            Self::Click { .. } | Self::DragCancel => None,
        }
    }

    /// Returns the position if this event has one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Click { pos, .. } | Self::DragStart { pos, .. } => Some(*pos),
            Self::DragMove { current, .. } => Some(*current),
            Self::DragEnd { end, .. } => Some(*end),
            Self::DragCancel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(3, 9);
        let b = Position::new(7, 2);
        assert_eq!(a.manhattan_distance(b), 11);
        assert_eq!(b.manhattan_distance(a), 11);
    }

    #[test]
    fn rows_from_is_signed() {
        let origin = Position::new(0, 10);
        assert_eq!(Position::new(0, 4).rows_from(origin), -6);
        assert_eq!(Position::new(5, 13).rows_from(origin), 3);
    }

    #[test]
    fn vertical_translation_per_kind() {
        let start = Position::new(1, 10);
        let moved = SemanticEvent::DragMove {
            start,
            current: Position::new(4, 2),
            delta: (3, -8),
        };
        assert_eq!(moved.vertical_translation(), Some(-8));

        let ended = SemanticEvent::DragEnd {
            start,
            end: Position::new(1, 15),
        };
        assert_eq!(ended.vertical_translation(), Some(5));
        assert_eq!(SemanticEvent::DragCancel.vertical_translation(), None);
    }

    #[test]
    fn drag_classification() {
        assert!(SemanticEvent::DragCancel.is_drag());
        let click = SemanticEvent::Click {
            pos: Position::new(0, 0),
            button: MouseButton::Left,
        };
        assert!(!click.is_drag());
        assert_eq!(click.position(), Some(Position::new(0, 0)));
    }
}
