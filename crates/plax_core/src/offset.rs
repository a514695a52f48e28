//! Offset values and their string forms
//!
//! Offsets are configured per axis as min/max pairs like `"-20%"` or
//! `"30px"`. A bare number (`"40"` or `40.0`) is taken as a percentage.
//! Percent offsets are relative to the element's own size on that axis, so
//! they resolve to pixels only once the element has been measured.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParallaxError, Result};

// ============================================================================
// Units
// ============================================================================

/// Unit of a parsed offset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OffsetUnit {
    /// Percentage of the element's own size on the offset's axis
    #[default]
    Percent,
    /// Absolute CSS pixels
    Pixels,
}

impl fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetUnit::Percent => write!(f, "%"),
            OffsetUnit::Pixels => write!(f, "px"),
        }
    }
}

/// Axis an offset pair applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

// ============================================================================
// Offset
// ============================================================================

/// A single offset: a value and its unit.
///
/// Displays in the exact form written into `translate3d(..)`, e.g. `-20%`
/// or `30px`. Serializes to and from that string form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Offset {
    pub value: f64,
    pub unit: OffsetUnit,
}

impl Offset {
    /// Percentage offset, relative to the element's size on its axis
    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: OffsetUnit::Percent,
        }
    }

    /// Absolute pixel offset
    pub fn pixels(value: f64) -> Self {
        Self {
            value,
            unit: OffsetUnit::Pixels,
        }
    }

    /// The default `0%` offset
    pub fn zero() -> Self {
        Self::percent(0.0)
    }

    /// Pixel value of this offset against the given basis length.
    ///
    /// Percent offsets resolve against the basis (the element's own height
    /// for the y axis, width for the x axis); pixel offsets are returned
    /// unchanged.
    pub fn resolve(&self, basis: f64) -> f64 {
        match self.unit {
            OffsetUnit::Percent => self.value / 100.0 * basis,
            OffsetUnit::Pixels => self.value,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Offset {
    type Err = ParallaxError;

    /// Parses `"-20%"`, `"30px"` and bare numbers like `"40"` (percent).
    /// Unknown units and non-numeric or non-finite values are errors rather
    /// than silent zeroes or NaN.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (number, unit) = if let Some(prefix) = trimmed.strip_suffix("px") {
            (prefix, OffsetUnit::Pixels)
        } else if let Some(prefix) = trimmed.strip_suffix('%') {
            (prefix, OffsetUnit::Percent)
        } else if trimmed.ends_with(|c: char| c.is_ascii_digit() || c == '.') {
            (trimmed, OffsetUnit::Percent)
        } else {
            return Err(ParallaxError::InvalidOffsetUnit(s.to_string()));
        };

        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ParallaxError::InvalidOffsetValue(s.to_string()))?;
        if !value.is_finite() {
            return Err(ParallaxError::InvalidOffsetValue(s.to_string()));
        }

        Ok(Self { value, unit })
    }
}

/// Bare numbers are percentages
impl From<f64> for Offset {
    fn from(value: f64) -> Self {
        Self::percent(value)
    }
}

impl TryFrom<String> for Offset {
    type Error = ParallaxError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Offset> for String {
    fn from(offset: Offset) -> Self {
        offset.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent() {
        let offset: Offset = "-20%".parse().unwrap();
        assert_eq!(offset, Offset::percent(-20.0));
    }

    #[test]
    fn test_parse_pixels() {
        let offset: Offset = "30px".parse().unwrap();
        assert_eq!(offset, Offset::pixels(30.0));
    }

    #[test]
    fn test_parse_unitless_defaults_to_percent() {
        let offset: Offset = "40".parse().unwrap();
        assert_eq!(offset, Offset::percent(40.0));
    }

    #[test]
    fn test_parse_negative_and_fractional() {
        let offset: Offset = "-12.5px".parse().unwrap();
        assert_eq!(offset, Offset::pixels(-12.5));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let offset: Offset = " 15 % ".parse().unwrap();
        assert_eq!(offset, Offset::percent(15.0));
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = "2em".parse::<Offset>().unwrap_err();
        assert_eq!(err, ParallaxError::InvalidOffsetUnit("2em".to_string()));
    }

    #[test]
    fn test_parse_rejects_non_numeric_value() {
        let err = "abc%".parse::<Offset>().unwrap_err();
        assert_eq!(err, ParallaxError::InvalidOffsetValue("abc%".to_string()));
    }

    #[test]
    fn test_parse_rejects_non_finite_value() {
        assert!("inf%".parse::<Offset>().is_err());
        assert!("NaN%".parse::<Offset>().is_err());
    }

    #[test]
    fn test_display_matches_css_form() {
        assert_eq!(Offset::percent(-20.0).to_string(), "-20%");
        assert_eq!(Offset::pixels(30.0).to_string(), "30px");
        assert_eq!(Offset::percent(12.5).to_string(), "12.5%");
    }

    #[test]
    fn test_resolve_percent_against_basis() {
        assert_eq!(Offset::percent(-20.0).resolve(200.0), -40.0);
        assert_eq!(Offset::percent(50.0).resolve(120.0), 60.0);
    }

    #[test]
    fn test_resolve_pixels_ignores_basis() {
        assert_eq!(Offset::pixels(30.0).resolve(200.0), 30.0);
    }

    #[test]
    fn test_bare_number_becomes_percent() {
        assert_eq!(Offset::from(40.0), Offset::percent(40.0));
    }

    #[test]
    fn test_serde_round_trips_string_form() {
        let json = serde_json::to_string(&Offset::percent(-20.0)).unwrap();
        assert_eq!(json, "\"-20%\"");
        let back: Offset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Offset::percent(-20.0));
    }

    #[test]
    fn test_serde_rejects_bad_unit() {
        assert!(serde_json::from_str::<Offset>("\"2em\"").is_err());
    }
}
