// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature on both sides of the bridge.
//!
//! The device reports color temperature in a Kelvin-like range of
//! 1800-6500, while the characteristic layer uses 153-555. The two are
//! related by the linear [`ValueRange::remap`](super::ValueRange::remap);
//! the conversions here clamp at the boundary so out-of-range input never
//! produces out-of-range output.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

use super::range::{DEVICE_COLOR_TEMPERATURE, UI_COLOR_TEMPERATURE};

/// Color temperature as exposed to the characteristic layer (153-555).
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::UiColorTemperature;
///
/// let ct = UiColorTemperature::new(153).unwrap();
/// assert_eq!(ct.to_device().value(), 1800);
///
/// assert!(UiColorTemperature::new(600).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct UiColorTemperature(u16);

impl UiColorTemperature {
    /// Lower bound of the characteristic range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const MIN: u16 = UI_COLOR_TEMPERATURE.min() as u16;

    /// Upper bound of the characteristic range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const MAX: u16 = UI_COLOR_TEMPERATURE.max() as u16;

    /// Creates a new characteristic color temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [153, 555].
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: UI_COLOR_TEMPERATURE.min(),
                max: UI_COLOR_TEMPERATURE.max(),
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a characteristic color temperature, clamping to the valid range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        Self(UI_COLOR_TEMPERATURE.clamp(value) as u16)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Converts to the device's color temperature scale.
    #[must_use]
    pub fn to_device(&self) -> DeviceColorTemperature {
        DeviceColorTemperature::clamped(
            UI_COLOR_TEMPERATURE.remap(i64::from(self.0), &DEVICE_COLOR_TEMPERATURE),
        )
    }
}

impl fmt::Display for UiColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for UiColorTemperature {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UiColorTemperature> for u16 {
    fn from(value: UiColorTemperature) -> Self {
        value.0
    }
}

/// Color temperature in the device's native range (1800-6500).
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::DeviceColorTemperature;
///
/// let ct: DeviceColorTemperature = "6500".parse().unwrap();
/// assert_eq!(ct.to_ui().value(), 555);
///
/// // Wire values outside the range are clamped
/// let hot: DeviceColorTemperature = "9000".parse().unwrap();
/// assert_eq!(hot.value(), 6500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceColorTemperature(u16);

impl DeviceColorTemperature {
    /// Lower bound of the device range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const MIN: u16 = DEVICE_COLOR_TEMPERATURE.min() as u16;

    /// Upper bound of the device range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const MAX: u16 = DEVICE_COLOR_TEMPERATURE.max() as u16;

    /// Creates a new device color temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1800, 6500].
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: DEVICE_COLOR_TEMPERATURE.min(),
                max: DEVICE_COLOR_TEMPERATURE.max(),
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a device color temperature, clamping to the valid range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        Self(DEVICE_COLOR_TEMPERATURE.clamp(value) as u16)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Converts to the characteristic color temperature scale.
    #[must_use]
    pub fn to_ui(&self) -> UiColorTemperature {
        UiColorTemperature::clamped(
            DEVICE_COLOR_TEMPERATURE.remap(i64::from(self.0), &UI_COLOR_TEMPERATURE),
        )
    }

    /// Returns the value as sent to the device.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for DeviceColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

/// Parses a decimal wire value, clamping it into the device range.
impl FromStr for DeviceColorTemperature {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_map_to_bounds() {
        assert_eq!(DeviceColorTemperature::new(1800).unwrap().to_ui().value(), 153);
        assert_eq!(DeviceColorTemperature::new(6500).unwrap().to_ui().value(), 555);
        assert_eq!(UiColorTemperature::new(153).unwrap().to_device().value(), 1800);
        assert_eq!(UiColorTemperature::new(555).unwrap().to_device().value(), 6500);
    }

    #[test]
    fn midpoint_maps_to_midpoint() {
        assert_eq!(DeviceColorTemperature::new(4150).unwrap().to_ui().value(), 354);
    }

    #[test]
    fn ui_range_is_enforced() {
        assert!(UiColorTemperature::new(152).is_err());
        assert!(UiColorTemperature::new(556).is_err());
        assert_eq!(UiColorTemperature::clamped(1000).value(), 555);
        assert_eq!(UiColorTemperature::clamped(0).value(), 153);
    }

    #[test]
    fn device_range_is_enforced() {
        let err = DeviceColorTemperature::new(1000).unwrap_err();
        assert_eq!(
            err,
            ValueError::OutOfRange {
                min: 1800,
                max: 6500,
                actual: 1000
            }
        );
        assert_eq!(DeviceColorTemperature::clamped(-20).value(), 1800);
    }

    #[test]
    fn device_wire_parsing_clamps() {
        assert_eq!("2700".parse::<DeviceColorTemperature>().unwrap().value(), 2700);
        assert_eq!("100".parse::<DeviceColorTemperature>().unwrap().value(), 1800);
        assert!("warm".parse::<DeviceColorTemperature>().is_err());
    }

    #[test]
    fn round_trip_is_stable_over_device_range() {
        for v in DeviceColorTemperature::MIN..=DeviceColorTemperature::MAX {
            let first = DeviceColorTemperature::new(v).unwrap().to_ui();
            let again = first.to_device().to_ui();
            assert!(
                first.value().abs_diff(again.value()) <= 1,
                "round trip drifted for {v}"
            );
        }
    }
}
