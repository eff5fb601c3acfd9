#![forbid(unsafe_code)]

//! Split geometry: card height, partition range, and notch quantization.
//!
//! All values are in host units (points on touch hosts, rows on terminals).
//! Degenerate input (zero, negative or non-finite heights) collapses the
//! geometry to `card_height == range == 0`, so every partition clamps to 0
//! and nothing downstream divides by zero.

use crate::config::SplitConfig;

/// Vertical space reported by the host for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Total height available to the split.
    pub available_height: f64,
    /// Safe-area inset at the top edge.
    pub top_inset: f64,
    /// Safe-area inset at the bottom edge.
    pub bottom_inset: f64,
}

impl Viewport {
    /// A viewport without safe-area insets.
    #[must_use]
    pub const fn new(available_height: f64) -> Self {
        Self {
            available_height,
            top_inset: 0.0,
            bottom_inset: 0.0,
        }
    }

    /// Set the safe-area insets.
    #[must_use]
    pub const fn with_insets(mut self, top: f64, bottom: f64) -> Self {
        self.top_inset = top;
        self.bottom_inset = bottom;
        self
    }

    /// Height left once the insets are removed.
    #[must_use]
    pub fn usable_height(&self) -> f64 {
        self.available_height - self.top_inset - self.bottom_inset
    }
}

/// Derived geometry the partition controller works in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitGeometry {
    usable_height: f64,
    card_height: f64,
    range: f64,
    collar: f64,
    notch_count: u32,
    bottom_extra_offset: f64,
}

impl SplitGeometry {
    /// Derive geometry from a viewport and the configured spacing.
    #[must_use]
    pub fn new(viewport: Viewport, config: &SplitConfig) -> Self {
        let card_height = card_height_for(sanitize(viewport.usable_height()), config.spacing);
        let bottom_extra_offset = if viewport.bottom_inset == 0.0 {
            config.bottom_extra_offset
        } else {
            0.0
        };
        let mut geometry = Self::from_card_height(card_height, config);
        geometry.usable_height = sanitize(viewport.usable_height());
        geometry.bottom_extra_offset = bottom_extra_offset;
        geometry
    }

    /// Geometry with an explicit card height (no bottom compensation).
    #[must_use]
    pub fn from_card_height(card_height: f64, config: &SplitConfig) -> Self {
        let card_height = sanitize(card_height);
        Self {
            usable_height: card_height * 2.0 + config.spacing,
            card_height,
            range: sanitize(card_height - config.collar),
            collar: config.collar,
            notch_count: config.notch_count.max(1),
            bottom_extra_offset: 0.0,
        }
    }

    /// Height between the safe-area insets.
    #[must_use]
    pub const fn usable_height(&self) -> f64 {
        self.usable_height
    }

    /// Height of one pane at the even split.
    #[must_use]
    pub const fn card_height(&self) -> f64 {
        self.card_height
    }

    /// Largest partition magnitude reachable during normal interaction.
    #[must_use]
    pub const fn range(&self) -> f64 {
        self.range
    }

    /// Collar height the geometry was derived with.
    #[must_use]
    pub const fn collar(&self) -> f64 {
        self.collar
    }

    /// Number of notches between the mini positions.
    #[must_use]
    pub const fn notch_count(&self) -> u32 {
        self.notch_count
    }

    /// Handle offset compensation for hosts without a bottom safe area.
    #[must_use]
    pub const fn bottom_extra_offset(&self) -> f64 {
        self.bottom_extra_offset
    }

    /// Whether there is no room to move the partition at all.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.range <= 0.0
    }

    /// Clamp a partition to `[-range, range]`; non-finite input becomes 0.
    #[must_use]
    pub fn clamp_partition(&self, partition: f64) -> f64 {
        if partition.is_nan() {
            return 0.0;
        }
        partition.clamp(-self.range, self.range)
    }

    /// Nearest notch index for a partition, in `0..=notch_count`.
    #[must_use]
    pub fn notch_for_partition(&self, partition: f64) -> u32 {
        let n = self.notch_count;
        if partition < -self.range {
            return 0;
        }
        if partition > self.range {
            return n;
        }
        if self.is_degenerate() || partition.is_nan() {
            return (f64::from(n) * 0.5).round() as u32;
        }
        // Multiply before dividing so whole-cell partitions land on exact notches.
        let position = (partition + self.range) * f64::from(n) / (self.range * 2.0);
        (position.round() as u32).min(n)
    }

    /// Partition at the exact position of a notch.
    #[must_use]
    pub fn snapped_partition(&self, notch: u32) -> f64 {
        let notch = notch.min(self.notch_count);
        f64::from(notch) * self.range * 2.0 / f64::from(self.notch_count) - self.range
    }

    /// Card height when the panes are separated by `spacing` instead of the
    /// configured gap (the accessory menu doubles it).
    #[must_use]
    pub fn card_height_with_spacing(&self, spacing: f64) -> f64 {
        card_height_for(self.usable_height, spacing)
    }
}

fn card_height_for(usable_height: f64, spacing: f64) -> f64 {
    sanitize(usable_height / 2.0 - spacing / 2.0)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
