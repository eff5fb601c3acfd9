#![forbid(unsafe_code)]

//! Named and fractional split positions.
//!
//! A [`Detent`] is a pure value. Out-of-range fractions are representable on
//! purpose: they are resolved when the controller applies them, not when they
//! are built (see [`Detent::validate`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the top and bottom panes divide the available space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Detent {
    /// The top pane fills the screen; the bottom pane is hidden behind a pill.
    TopFull,
    /// The bottom pane fills the screen; the top pane is hidden behind a pill.
    BottomFull,
    /// The top pane is reduced to its collar and shows its mini overlay.
    TopMini,
    /// The bottom pane is reduced to its collar and shows its mini overlay.
    BottomMini,
    /// Proportion of the splittable range given to the top pane, in `0..=1`.
    Fraction(f64),
}

impl Default for Detent {
    fn default() -> Self {
        Self::Fraction(0.5)
    }
}

/// Outcome of checking a detent before it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetentCheck {
    /// The detent can be applied as-is.
    Valid(Detent),
    /// The fraction was out of range and resolves to another detent.
    Resolved { requested: f64, resolved: Detent },
}

impl DetentCheck {
    /// The detent that should actually be applied.
    #[must_use]
    pub const fn detent(self) -> Detent {
        match self {
            Self::Valid(detent) => detent,
            Self::Resolved { resolved, .. } => resolved,
        }
    }
}

impl Detent {
    /// Whether one pane is removed from the layout.
    #[must_use]
    pub const fn is_full(self) -> bool {
        matches!(self, Self::TopFull | Self::BottomFull)
    }

    /// Whether one pane is reduced to its collar.
    #[must_use]
    pub const fn is_mini(self) -> bool {
        matches!(self, Self::TopMini | Self::BottomMini)
    }

    /// The fraction carried by a `Fraction` detent.
    #[must_use]
    pub const fn fraction(self) -> Option<f64> {
        match self {
            Self::Fraction(value) => Some(value),
            _ => None,
        }
    }

    /// Check the detent and resolve invalid fractions.
    ///
    /// A fraction below 0 is a drag past the top edge and becomes
    /// [`Detent::BottomFull`]; above 1 becomes [`Detent::TopFull`]. NaN has no
    /// direction and falls back to the even split.
    #[must_use]
    pub fn validate(self) -> DetentCheck {
        match self {
            Self::Fraction(value) if value < 0.0 => DetentCheck::Resolved {
                requested: value,
                resolved: Self::BottomFull,
            },
            Self::Fraction(value) if value > 1.0 => DetentCheck::Resolved {
                requested: value,
                resolved: Self::TopFull,
            },
            Self::Fraction(value) if value.is_nan() => DetentCheck::Resolved {
                requested: value,
                resolved: Self::default(),
            },
            other => DetentCheck::Valid(other),
        }
    }
}

impl fmt::Display for Detent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopFull => f.write_str("topFull"),
            Self::BottomFull => f.write_str("bottomFull"),
            Self::TopMini => f.write_str("topMini"),
            Self::BottomMini => f.write_str("bottomMini"),
            Self::Fraction(value) => write!(f, "fraction({value:.3})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_even_split() {
        assert_eq!(Detent::default(), Detent::Fraction(0.5));
    }

    #[test]
    fn display_formats_fraction_with_three_decimals() {
        assert_eq!(Detent::Fraction(0.5).to_string(), "fraction(0.500)");
        assert_eq!(Detent::Fraction(1.0 / 3.0).to_string(), "fraction(0.333)");
        assert_eq!(Detent::TopMini.to_string(), "topMini");
        assert_eq!(Detent::BottomFull.to_string(), "bottomFull");
    }

    #[test]
    fn negative_fraction_resolves_to_bottom_full() {
        assert_eq!(
            Detent::Fraction(-0.1).validate(),
            DetentCheck::Resolved {
                requested: -0.1,
                resolved: Detent::BottomFull
            }
        );
    }

    #[test]
    fn fraction_above_one_resolves_to_top_full() {
        assert_eq!(Detent::Fraction(1.5).validate().detent(), Detent::TopFull);
    }

    #[test]
    fn boundaries_are_valid() {
        assert_eq!(
            Detent::Fraction(0.0).validate(),
            DetentCheck::Valid(Detent::Fraction(0.0))
        );
        assert_eq!(
            Detent::Fraction(1.0).validate(),
            DetentCheck::Valid(Detent::Fraction(1.0))
        );
    }

    #[test]
    fn nan_falls_back_to_even_split() {
        assert_eq!(
            Detent::Fraction(f64::NAN).validate().detent(),
            Detent::Fraction(0.5)
        );
    }

    #[test]
    fn classification() {
        assert!(Detent::TopFull.is_full());
        assert!(!Detent::TopFull.is_mini());
        assert!(Detent::BottomMini.is_mini());
        assert_eq!(Detent::Fraction(0.25).fraction(), Some(0.25));
        assert_eq!(Detent::TopMini.fraction(), None);
    }

    #[test]
    fn serde_uses_tagged_representation() {
        let json = serde_json::to_string(&Detent::Fraction(0.5)).expect("serialize");
        assert_eq!(json, r#"{"kind":"fraction","value":0.5}"#);
        let back: Detent = serde_json::from_str(r#"{"kind":"top_mini"}"#).expect("deserialize");
        assert_eq!(back, Detent::TopMini);
    }
}
