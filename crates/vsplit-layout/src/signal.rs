#![forbid(unsafe_code)]

//! Discrete events emitted by the split while it is being driven.
//!
//! The controller never plays feedback itself. Each [`SplitSignal`] carries a
//! [`Feedback`] hint ([`SplitSignal::feedback`]) that a host adapter can map to
//! haptics, a bell, or nothing at all.

use serde::{Deserialize, Serialize};

use crate::detent::Detent;

/// Vertical direction of handle movement.
///
/// `Up` shrinks the top pane (partition decreases), `Down` grows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`.
    #[must_use]
    pub fn between(from: f64, to: f64) -> Self {
        if to < from { Self::Up } else { Self::Down }
    }
}

/// Strength class of a feedback hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStyle {
    Light,
    Medium,
    Rigid,
}

/// Feedback a host may play for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub style: FeedbackStyle,
    /// Relative intensity in `0..=1`.
    pub intensity: f32,
}

impl Feedback {
    #[must_use]
    pub const fn new(style: FeedbackStyle, intensity: f32) -> Self {
        Self { style, intensity }
    }
}

/// A discrete event produced by the controller or the component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum SplitSignal {
    /// First movement of a drag session.
    DragStarted { from_minimized: bool },
    /// The drag left the partition range and overscroll is now tracked.
    EnteredOverscroll { direction: Direction },
    /// The live partition moved across a notch.
    SnapCrossed { direction: Direction, notch: u32 },
    /// A drag ended and settled on a detent.
    Committed { detent: Detent },
    /// A drag ended without changing the detent.
    Cancelled,
    /// A leading or trailing accessory was tapped.
    AccessoryTapped { id: String },
    /// A menu item was tapped (the menu closes).
    MenuItemTapped { id: String },
    /// The accessory menu opened or closed.
    MenuToggled { open: bool },
}

impl SplitSignal {
    /// Suggested feedback, or `None` when the event should be silent.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        match self {
            Self::DragStarted {
                from_minimized: true,
            } => Some(Feedback::new(FeedbackStyle::Medium, 0.6)),
            Self::EnteredOverscroll { .. } => Some(Feedback::new(FeedbackStyle::Medium, 0.8)),
            Self::SnapCrossed { .. } => Some(Feedback::new(FeedbackStyle::Rigid, 0.8)),
            Self::Committed { detent } if detent.is_full() => {
                Some(Feedback::new(FeedbackStyle::Medium, 0.8))
            }
            Self::Committed { .. } => Some(Feedback::new(FeedbackStyle::Rigid, 0.8)),
            Self::AccessoryTapped { .. } | Self::MenuItemTapped { .. } => {
                Some(Feedback::new(FeedbackStyle::Light, 0.5))
            }
            Self::DragStarted { .. } | Self::Cancelled | Self::MenuToggled { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_between() {
        assert_eq!(Direction::between(10.0, -5.0), Direction::Up);
        assert_eq!(Direction::between(-5.0, 10.0), Direction::Down);
    }

    #[test]
    fn resuming_from_minimized_is_medium() {
        let signal = SplitSignal::DragStarted {
            from_minimized: true,
        };
        assert_eq!(
            signal.feedback(),
            Some(Feedback::new(FeedbackStyle::Medium, 0.6))
        );
        assert_eq!(
            SplitSignal::DragStarted {
                from_minimized: false
            }
            .feedback(),
            None
        );
    }

    #[test]
    fn full_commit_is_medium_other_commits_rigid() {
        let full = SplitSignal::Committed {
            detent: Detent::TopFull,
        };
        let notch = SplitSignal::Committed {
            detent: Detent::Fraction(0.5),
        };
        assert_eq!(full.feedback().map(|f| f.style), Some(FeedbackStyle::Medium));
        assert_eq!(notch.feedback().map(|f| f.style), Some(FeedbackStyle::Rigid));
    }

    #[test]
    fn cancel_is_silent() {
        assert!(SplitSignal::Cancelled.feedback().is_none());
        assert!(SplitSignal::MenuToggled { open: true }.feedback().is_none());
    }

    #[test]
    fn serializes_with_tag() {
        let json = serde_json::to_string(&SplitSignal::SnapCrossed {
            direction: Direction::Down,
            notch: 4,
        })
        .expect("serialize");
        assert_eq!(
            json,
            r#"{"signal":"snap_crossed","direction":"down","notch":4}"#
        );
    }
}
