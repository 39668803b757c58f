// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Percentage type shared by brightness and saturation.
//!
//! Both the device and the characteristic layer express brightness and
//! saturation as 0-100 integers, so one range-checked type covers both.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// An integer percentage (0-100).
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::Percent;
///
/// let level = Percent::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// assert_eq!(Percent::MIN.value(), 0);
/// assert_eq!(Percent::MAX.value(), 100);
///
/// // Invalid values return error
/// assert!(Percent::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    /// Minimum value (0%).
    pub const MIN: Self = Self(0);

    /// Maximum value (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidPercent` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::InvalidPercent(value));
        }
        Ok(Self(value))
    }

    /// Creates a percentage, clamping to the valid range.
    ///
    /// # Examples
    ///
    /// ```
    /// use bulb_bridge::types::Percent;
    ///
    /// assert_eq!(Percent::clamped(150).value(), 100);
    /// assert_eq!(Percent::clamped(-5).value(), 0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self(0)
        } else if value > 100 {
            Self(100)
        } else {
            Self(value as u8)
        }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Percent {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

/// Parses a decimal wire value, clamping it into 0-100.
impl FromStr for Percent {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_valid_values() {
        for v in 0..=100 {
            assert_eq!(Percent::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn percent_invalid_value() {
        assert!(matches!(Percent::new(101), Err(ValueError::InvalidPercent(101))));
    }

    #[test]
    fn percent_clamped() {
        assert_eq!(Percent::clamped(50).value(), 50);
        assert_eq!(Percent::clamped(150).value(), 100);
        assert_eq!(Percent::clamped(-1).value(), 0);
    }

    #[test]
    fn percent_from_wire_string() {
        assert_eq!("80".parse::<Percent>().unwrap().value(), 80);
        assert_eq!(" 42 ".parse::<Percent>().unwrap().value(), 42);
        assert_eq!("250".parse::<Percent>().unwrap().value(), 100);
        assert!("bright".parse::<Percent>().is_err());
    }

    #[test]
    fn percent_display() {
        assert_eq!(Percent::new(75).unwrap().to_string(), "75%");
    }

    #[test]
    fn percent_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Percent>("101").is_err());
        assert_eq!(serde_json::from_str::<Percent>("64").unwrap().value(), 64);
    }
}
