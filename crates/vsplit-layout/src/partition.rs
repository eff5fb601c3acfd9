#![forbid(unsafe_code)]

//! Partition controller: the drag state machine behind the split.
//!
//! The controller owns the signed *partition* (offset of the split line from
//! the even split), the damped *overscroll* past the partition range, and the
//! hidden-pane flags. It is driven three ways:
//!
//! - [`PartitionController::apply_detent`] maps a detent to a partition.
//! - [`PartitionController::on_drag_changed`] follows a live drag.
//! - [`PartitionController::on_drag_ended`] snaps and derives the new detent.
//!
//! ```text
//! Idle --drag--> Dragging <--> Overscrolling
//!   ^                |               |
//!   +---- end / cancel --------------+
//! ```
//!
//! # Invariants
//!
//! 1. `hide_top && hide_bottom` is never true.
//! 2. Outside a drag, `partition` is within `[-range, range]`.
//! 3. `overscroll` is 0 whenever the phase is not `Overscrolling`.
//! 4. Geometry does not change during a drag; updates are deferred to the end.
//!
//! # Failure Modes
//!
//! - Non-finite drag translations are ignored; a non-finite release cancels.
//! - Degenerate geometry (no card height) pins every partition to 0.

use crate::config::SplitConfig;
use crate::detent::{Detent, DetentCheck};
use crate::geometry::SplitGeometry;
use crate::signal::{Direction, SplitSignal};

/// Drag lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Overscrolling,
}

/// Result of mapping a detent onto the current geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    pub partition: f64,
    pub hide_top: bool,
    pub hide_bottom: bool,
    /// The detent an invalid fraction resolved to, if any.
    pub resolved: Option<Detent>,
}

/// Split-position state machine.
#[derive(Debug, Clone)]
pub struct PartitionController {
    config: SplitConfig,
    geometry: SplitGeometry,
    pending_geometry: Option<SplitGeometry>,
    detent: Detent,
    partition: f64,
    overscroll: f64,
    hide_top: bool,
    hide_bottom: bool,
    initial_partition: Option<f64>,
    initial_minimal: bool,
    initial_top: bool,
    translation_before_overscroll: Option<f64>,
    signals: Vec<SplitSignal>,
}

impl PartitionController {
    /// Create a controller resting at `detent`.
    #[must_use]
    pub fn new(config: SplitConfig, geometry: SplitGeometry, detent: Detent) -> Self {
        let mut controller = Self {
            config,
            geometry,
            pending_geometry: None,
            detent: Detent::default(),
            partition: 0.0,
            overscroll: 0.0,
            hide_top: false,
            hide_bottom: false,
            initial_partition: None,
            initial_minimal: false,
            initial_top: false,
            translation_before_overscroll: None,
            signals: Vec::with_capacity(4),
        };
        controller.apply_detent(detent);
        controller
    }

    #[must_use]
    pub const fn config(&self) -> &SplitConfig {
        &self.config
    }

    #[must_use]
    pub const fn geometry(&self) -> &SplitGeometry {
        &self.geometry
    }

    /// The last applied or committed detent.
    #[must_use]
    pub const fn detent(&self) -> Detent {
        self.detent
    }

    #[must_use]
    pub const fn partition(&self) -> f64 {
        self.partition
    }

    #[must_use]
    pub const fn overscroll(&self) -> f64 {
        self.overscroll
    }

    #[must_use]
    pub const fn hide_top(&self) -> bool {
        self.hide_top
    }

    #[must_use]
    pub const fn hide_bottom(&self) -> bool {
        self.hide_bottom
    }

    /// Whether one pane is hidden behind the pill.
    #[must_use]
    pub const fn is_minimized(&self) -> bool {
        self.hide_top || self.hide_bottom
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        match (self.initial_partition, self.translation_before_overscroll) {
            (None, _) => DragPhase::Idle,
            (Some(_), None) => DragPhase::Dragging,
            (Some(_), Some(_)) => DragPhase::Overscrolling,
        }
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.initial_partition.is_some()
    }

    /// Take all queued signals in emission order.
    pub fn drain_signals(&mut self) -> std::vec::Drain<'_, SplitSignal> {
        self.signals.drain(..)
    }

    /// Replace the geometry and re-derive the partition from the detent.
    ///
    /// During a drag the new geometry is held back and applied when the
    /// gesture ends. Returns `true` if it took effect immediately.
    pub fn set_geometry(&mut self, geometry: SplitGeometry) -> bool {
        if self.is_dragging() {
            tracing::debug!(
                card_height = geometry.card_height(),
                "geometry deferred until drag ends"
            );
            self.pending_geometry = Some(geometry);
            return false;
        }
        self.geometry = geometry;
        self.apply_detent(self.detent);
        true
    }

    /// Map a detent onto the current geometry without touching any state.
    #[must_use]
    pub fn partition_for(&self, detent: Detent) -> Applied {
        let g = &self.geometry;
        let check = detent.validate();
        let resolved = match check {
            DetentCheck::Valid(_) => None,
            DetentCheck::Resolved { resolved, .. } => Some(resolved),
        };
        let (partition, hide_top, hide_bottom) = match check.detent() {
            Detent::TopFull => (g.card_height() - g.collar(), false, true),
            Detent::BottomFull => (-(g.card_height() - g.collar()), true, false),
            Detent::TopMini => (-g.range(), false, false),
            Detent::BottomMini => (g.range(), false, false),
            Detent::Fraction(value) => {
                let notch = (f64::from(g.notch_count()) * value).round() as u32;
                let edge = if value == 0.0 {
                    g.collar()
                } else if value == 1.0 {
                    -g.collar()
                } else {
                    0.0
                };
                (g.snapped_partition(notch) + edge, false, false)
            }
        };
        Applied {
            partition: g.clamp_partition(partition),
            hide_top,
            hide_bottom,
            resolved,
        }
    }

    /// Apply a detent: set the partition and hidden flags, clear overscroll.
    ///
    /// Invalid fractions are resolved to the matching full detent with a
    /// warning; [`Applied::resolved`] reports the substitution so the caller
    /// can write it back.
    pub fn apply_detent(&mut self, detent: Detent) -> Applied {
        let applied = self.partition_for(detent);
        if applied.resolved.is_some() {
            tracing::warn!(
                requested = %detent,
                "invalid split detent, fraction should be in range 0...1"
            );
        }
        tracing::info!(detent = %applied.resolved.unwrap_or(detent), "split detent applied");

        self.detent = applied.resolved.unwrap_or(detent);
        self.partition = applied.partition;
        self.hide_top = applied.hide_top;
        self.hide_bottom = applied.hide_bottom;
        self.overscroll = 0.0;
        self.translation_before_overscroll = None;
        applied
    }

    /// Nearest notch index for a partition.
    #[must_use]
    pub fn notch_for_partition(&self, partition: f64) -> u32 {
        self.geometry.notch_for_partition(partition)
    }

    /// Follow a live drag. `translation_y` is the total vertical translation
    /// since the gesture began (positive is downward).
    pub fn on_drag_changed(&mut self, translation_y: f64) {
        if !translation_y.is_finite() {
            tracing::trace!("non-finite drag translation ignored");
            return;
        }
        let initial = self.begin_session();
        let g = self.geometry;

        let translation = initial + translation_y;
        if !translation.is_finite() {
            tracing::trace!("drag translation overflowed, sample ignored");
            return;
        }
        let new_partition = g.clamp_partition(translation + self.minimal_adjustment());

        if translation < -g.range() || translation > g.range() {
            // Excess is measured from the crossed edge, not the first sample.
            let (direction, edge) = if translation < 0.0 {
                (Direction::Up, -g.range())
            } else {
                (Direction::Down, g.range())
            };
            if self.translation_before_overscroll != Some(edge) {
                tracing::debug!(?direction, translation, "entered overscroll");
                self.translation_before_overscroll = Some(edge);
                self.signals.push(SplitSignal::EnteredOverscroll { direction });
            }
            self.overscroll = (translation - edge) * self.config.overscroll_damping;
        } else {
            self.translation_before_overscroll = None;
            self.overscroll = 0.0;
        }

        self.hide_top = false;
        self.hide_bottom = false;

        let old_partition = self.partition;
        let notch = g.notch_for_partition(new_partition);
        let notch_partition = g.snapped_partition(notch);
        // Half-open so a sample landing exactly on the notch counts once.
        if (old_partition < notch_partition && notch_partition <= new_partition)
            || (old_partition > notch_partition && notch_partition >= new_partition)
        {
            let direction = Direction::between(old_partition, new_partition);
            tracing::trace!(notch, ?direction, "snap notch crossed");
            self.signals.push(SplitSignal::SnapCrossed { direction, notch });
        }
        self.partition = new_partition;
    }

    /// Finish a drag and settle on a detent.
    ///
    /// Returns the committed detent, or `None` when the gesture was a
    /// cancelled tap on a hidden pane (state is left as it was).
    pub fn on_drag_ended(&mut self, translation_y: f64) -> Option<Detent> {
        if !translation_y.is_finite() {
            tracing::debug!("non-finite release translation, cancelling drag");
            self.cancel_drag();
            return None;
        }
        let initial = self.begin_session();
        let g = self.geometry;
        let card = g.card_height();
        let collar = g.collar();
        let near = collar * 1.5;
        let far = collar * 2.0;

        let candidate = initial + translation_y + self.minimal_adjustment();
        let (mut partition, mut detent) = if candidate < -card + near {
            (collar - card, Detent::TopMini)
        } else if candidate < -card + far {
            (far - card, Detent::Fraction(0.0))
        } else if candidate > card - near {
            (card - collar, Detent::BottomMini)
        } else if candidate > card - far {
            (card - far, Detent::Fraction(1.0))
        } else {
            let notch = g.notch_for_partition(candidate);
            (
                g.snapped_partition(notch),
                Detent::Fraction(f64::from(notch) / f64::from(g.notch_count())),
            )
        };

        if self.initial_minimal
            && self.is_minimized()
            && translation_y.abs() < self.config.tap_slop
        {
            tracing::debug!("tap on hidden pane, drag cancelled");
            self.end_session();
            self.initial_minimal = true;
            self.signals.push(SplitSignal::Cancelled);
            return None;
        }

        let threshold = self.config.overscroll_commit_threshold;
        if self.overscroll < -threshold {
            detent = Detent::BottomFull;
            partition = -(card - collar);
            self.hide_top = true;
            self.hide_bottom = false;
        } else if self.overscroll > threshold {
            detent = Detent::TopFull;
            partition = card - collar;
            self.hide_top = false;
            self.hide_bottom = true;
        } else {
            self.hide_top = false;
            self.hide_bottom = false;
        }
        self.partition = g.clamp_partition(partition);
        self.detent = detent;

        tracing::debug!(%detent, partition = self.partition, "drag committed");
        self.end_session();
        self.initial_minimal = self.is_minimized();
        self.signals.push(SplitSignal::Committed { detent });
        self.apply_pending_geometry();
        Some(detent)
    }

    /// Abandon the drag in flight and restore the partition it started from.
    pub fn cancel_drag(&mut self) {
        let Some(initial) = self.initial_partition else {
            return;
        };
        tracing::debug!(partition = initial, "drag cancelled");
        let restored = self.partition_for(self.detent);
        self.partition = initial;
        self.hide_top = restored.hide_top;
        self.hide_bottom = restored.hide_bottom;
        self.end_session();
        self.initial_minimal = self.is_minimized();
        self.signals.push(SplitSignal::Cancelled);
        self.apply_pending_geometry();
    }

    /// Start a drag session if none is active; returns the initial partition.
    fn begin_session(&mut self) -> f64 {
        if let Some(initial) = self.initial_partition {
            return initial;
        }
        let from_minimized = self.is_minimized();
        self.initial_partition = Some(self.partition);
        self.initial_minimal = from_minimized;
        self.initial_top = self.hide_top;
        tracing::debug!(partition = self.partition, from_minimized, "drag started");
        self.signals.push(SplitSignal::DragStarted { from_minimized });
        self.partition
    }

    fn end_session(&mut self) {
        self.overscroll = 0.0;
        self.translation_before_overscroll = None;
        self.initial_partition = None;
        self.initial_top = false;
    }

    /// One-time offset applied to drags that start from a hidden pane, so the
    /// pane reappears under the pointer at its collar height.
    fn minimal_adjustment(&self) -> f64 {
        if !self.initial_minimal {
            return 0.0;
        }
        let adjustment = self.config.mini_adjustment();
        if self.initial_top {
            -adjustment
        } else {
            adjustment - self.geometry.bottom_extra_offset()
        }
    }

    fn apply_pending_geometry(&mut self) {
        if let Some(geometry) = self.pending_geometry.take() {
            self.geometry = geometry;
            let applied = self.partition_for(self.detent);
            self.partition = applied.partition;
        }
    }
}
