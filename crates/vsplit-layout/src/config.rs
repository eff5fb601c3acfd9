#![forbid(unsafe_code)]

//! Tunable constants for the split state machine.
//!
//! Every field defaults to the tuned value of the reference behavior, so
//! `SplitConfig::default()` is what hosts should use unless they render at a
//! different scale (a terminal host measures in rows, not points).
//!
//! # Loading
//!
//! With the `config-file` feature the config can be read from disk:
//!
//! ```toml
//! collar = 4.0
//! notch_count = 6
//! overscroll_commit_threshold = 2.0
//! ```
//!
//! Missing keys keep their defaults.

#[cfg(feature = "config-file")]
use std::path::Path;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default collar height (pane height when reduced to its mini overlay).
pub const DEFAULT_COLLAR: f64 = 58.0;
/// Default number of notches between the two mini positions.
pub const DEFAULT_NOTCH_COUNT: u32 = 6;
/// Default rubber-band factor applied to overscroll.
pub const DEFAULT_OVERSCROLL_DAMPING: f64 = 0.75;
/// Default overscroll magnitude that commits a full detent on release.
pub const DEFAULT_OVERSCROLL_COMMIT_THRESHOLD: f64 = 20.0;
/// Default inset subtracted from the collar when resuming from a hidden pane.
pub const DEFAULT_MINI_ADJUST_INSET: f64 = 8.0;
/// Default gap between the two panes (the handle lives here).
pub const DEFAULT_SPACING: f64 = 36.0;
/// Default extra offset for hosts without a bottom safe area.
pub const DEFAULT_BOTTOM_EXTRA_OFFSET: f64 = 16.0;
/// Default release distance below which a drag counts as a tap.
pub const DEFAULT_TAP_SLOP: f64 = 2.0;
/// Default handle height while a pane is hidden.
pub const DEFAULT_PILL_HEIGHT: f64 = 44.0;

/// Tunable parameters of the partition controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Height of a pane reduced to its mini overlay.
    pub collar: f64,
    /// Number of discrete notches a fractional detent snaps to.
    pub notch_count: u32,
    /// Factor applied to the raw excess once a drag leaves the range.
    pub overscroll_damping: f64,
    /// Overscroll magnitude past which a release commits a full detent.
    pub overscroll_commit_threshold: f64,
    /// Inset subtracted from the collar for the one-time adjustment applied
    /// when a drag starts from a hidden pane (adjustment is `collar - inset`).
    pub mini_adjust_inset: f64,
    /// Gap between the panes while the accessory menu is closed.
    pub spacing: f64,
    /// Extra handle offset used when the host reports no bottom inset.
    pub bottom_extra_offset: f64,
    /// Release translation below which a drag from a hidden pane is a tap.
    pub tap_slop: f64,
    /// Handle height while one pane is hidden.
    pub pill_height: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            collar: DEFAULT_COLLAR,
            notch_count: DEFAULT_NOTCH_COUNT,
            overscroll_damping: DEFAULT_OVERSCROLL_DAMPING,
            overscroll_commit_threshold: DEFAULT_OVERSCROLL_COMMIT_THRESHOLD,
            mini_adjust_inset: DEFAULT_MINI_ADJUST_INSET,
            spacing: DEFAULT_SPACING,
            bottom_extra_offset: DEFAULT_BOTTOM_EXTRA_OFFSET,
            tap_slop: DEFAULT_TAP_SLOP,
            pill_height: DEFAULT_PILL_HEIGHT,
        }
    }
}

impl SplitConfig {
    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), SplitConfigError> {
        let lengths = [
            ("collar", self.collar),
            ("overscroll_commit_threshold", self.overscroll_commit_threshold),
            ("mini_adjust_inset", self.mini_adjust_inset),
            ("spacing", self.spacing),
            ("bottom_extra_offset", self.bottom_extra_offset),
            ("tap_slop", self.tap_slop),
            ("pill_height", self.pill_height),
        ];
        for (field, value) in lengths {
            if !value.is_finite() {
                return Err(SplitConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(SplitConfigError::Negative { field, value });
            }
        }
        if self.notch_count == 0 {
            return Err(SplitConfigError::InvalidNotchCount(self.notch_count));
        }
        if !(self.overscroll_damping > 0.0 && self.overscroll_damping <= 1.0) {
            return Err(SplitConfigError::InvalidDamping(self.overscroll_damping));
        }
        Ok(())
    }

    /// The `collar - inset` adjustment applied when resuming from a hidden pane.
    #[must_use]
    pub fn mini_adjustment(&self) -> f64 {
        self.collar - self.mini_adjust_inset
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(s).map_err(ConfigLoadError::Toml)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigLoadError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigLoadError::Json)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }
}

/// A configuration value outside its accepted range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitConfigError {
    /// A length is NaN or infinite.
    NonFinite { field: &'static str },
    /// A length is negative.
    Negative { field: &'static str, value: f64 },
    /// `notch_count` must be at least 1.
    InvalidNotchCount(u32),
    /// `overscroll_damping` must be in `(0, 1]`.
    InvalidDamping(f64),
}

impl fmt::Display for SplitConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::Negative { field, value } => write!(f, "{field} must be >= 0, got {value}"),
            Self::InvalidNotchCount(count) => write!(f, "notch_count must be > 0, got {count}"),
            Self::InvalidDamping(value) => {
                write!(f, "overscroll_damping must be in (0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for SplitConfigError {}

/// Errors from loading a [`SplitConfig`] file.
#[cfg(feature = "config-file")]
#[derive(Debug)]
pub enum ConfigLoadError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Parsed but out of range.
    Invalid(SplitConfigError),
}

#[cfg(feature = "config-file")]
impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

#[cfg(feature = "config-file")]
impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}
