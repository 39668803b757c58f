// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hue and HSV color types.
//!
//! The characteristic layer exposes color as independent hue and saturation
//! values, while the device takes a single RGB hex string. [`HsvColor`] is
//! the meeting point between the two; see [`RgbColor`](super::RgbColor) for
//! the hex codec.

use std::fmt;

use crate::error::ValueError;

use super::Percent;

/// Hue angle in degrees (0-360, where both 0 and 360 are red).
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::Hue;
///
/// let green = Hue::new(120).unwrap();
/// assert_eq!(green.value(), 120);
/// assert!(Hue::new(361).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Hue(u16);

impl Hue {
    /// Maximum hue value.
    pub const MAX: u16 = 360;

    /// Creates a new hue.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHue` if the value is greater than 360.
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::InvalidHue(value));
        }
        Ok(Self(value))
    }

    /// Creates a hue, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u16) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

impl TryFrom<u16> for Hue {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hue> for u16 {
    fn from(value: Hue) -> Self {
        value.0
    }
}

/// HSV color representation (Hue, Saturation, Value).
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::{HsvColor, Hue, Percent};
///
/// let color = HsvColor::new(Hue::new(120).unwrap(), Percent::new(50).unwrap(), Percent::MAX);
/// assert_eq!(color.hue().value(), 120);
/// assert_eq!(color.saturation().value(), 50);
/// assert_eq!(color.value().value(), 100);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct HsvColor {
    hue: Hue,
    saturation: Percent,
    value: Percent,
}

impl HsvColor {
    /// Creates a new HSV color from range-checked components.
    #[must_use]
    pub const fn new(hue: Hue, saturation: Percent, value: Percent) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Creates an HSV color from raw components.
    ///
    /// # Errors
    ///
    /// Returns error if any component is outside its valid range.
    pub fn from_components(hue: u16, saturation: u8, value: u8) -> Result<Self, ValueError> {
        Ok(Self::new(
            Hue::new(hue)?,
            Percent::new(saturation)?,
            Percent::new(value)?,
        ))
    }

    /// Returns the hue component.
    #[must_use]
    pub const fn hue(&self) -> Hue {
        self.hue
    }

    /// Returns the saturation component.
    #[must_use]
    pub const fn saturation(&self) -> Percent {
        self.saturation
    }

    /// Returns the value (brightness) component.
    #[must_use]
    pub const fn value(&self) -> Percent {
        self.value
    }
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HSV({}, {}, {})",
            self.hue.value(),
            self.saturation,
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_valid_range() {
        assert_eq!(Hue::new(0).unwrap().value(), 0);
        assert_eq!(Hue::new(360).unwrap().value(), 360);
        assert!(matches!(Hue::new(361), Err(ValueError::InvalidHue(361))));
    }

    #[test]
    fn hue_clamped() {
        assert_eq!(Hue::clamped(400).value(), 360);
        assert_eq!(Hue::clamped(200).value(), 200);
    }

    #[test]
    fn hsv_from_components() {
        let color = HsvColor::from_components(180, 50, 75).unwrap();
        assert_eq!(color.hue().value(), 180);
        assert_eq!(color.saturation().value(), 50);
        assert_eq!(color.value().value(), 75);
    }

    #[test]
    fn hsv_from_components_invalid() {
        assert!(matches!(
            HsvColor::from_components(361, 50, 50),
            Err(ValueError::InvalidHue(361))
        ));
        assert!(matches!(
            HsvColor::from_components(180, 101, 50),
            Err(ValueError::InvalidPercent(101))
        ));
    }

    #[test]
    fn hsv_display() {
        let color = HsvColor::from_components(120, 100, 75).unwrap();
        assert_eq!(color.to_string(), "HSV(120, 100%, 75%)");
    }
}
