// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex codec and HSV conversion.
//!
//! The device encodes color as six hex digits without a leading marker
//! (`"ff8800"`). This module decodes that wire form into an [`HsvColor`] for
//! the characteristic layer and encodes HSV back into hex for writes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

use super::{HsvColor, Hue, Percent};

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::RgbColor;
///
/// let red = RgbColor::from_hex("ff0000").unwrap();
/// assert_eq!(red.red(), 255);
/// assert_eq!(red.green(), 0);
/// assert_eq!(red.blue(), 0);
///
/// assert_eq!(RgbColor::new(255, 136, 0).to_hex(), "ff8800");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses an RGB color from a six digit hex string.
    ///
    /// Either case is accepted, with or without a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string is not six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.trim().trim_start_matches('#');

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }

        let r = parse_hex_pair(&digits[0..2], hex)?;
        let g = parse_hex_pair(&digits[2..4], hex)?;
        let b = parse_hex_pair(&digits[4..6], hex)?;
        Ok(Self::new(r, g, b))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the device wire form: six lower-case hex digits, no prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Converts this RGB color to HSV.
    ///
    /// Rounding means RGB to HSV and back may not reproduce the exact input.
    ///
    /// # Examples
    ///
    /// ```
    /// use bulb_bridge::types::RgbColor;
    ///
    /// let hsv = RgbColor::new(255, 0, 0).to_hsv();
    /// assert_eq!(hsv.hue().value(), 0);
    /// assert_eq!(hsv.saturation().value(), 100);
    /// assert_eq!(hsv.value().value(), 100);
    /// ```
    #[must_use]
    pub fn to_hsv(&self) -> HsvColor {
        let (h, s, v) = rgb_to_hsv(self.red, self.green, self.blue);
        HsvColor::new(
            Hue::clamped(h),
            Percent::clamped(i64::from(s)),
            Percent::clamped(i64::from(v)),
        )
    }

    /// Creates an RGB color from an HSV color.
    #[must_use]
    pub fn from_hsv(hsv: &HsvColor) -> Self {
        let (r, g, b) = hsv_to_rgb(
            hsv.hue().value(),
            hsv.saturation().value(),
            hsv.value().value(),
        );
        Self::new(r, g, b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

fn parse_hex_pair(pair: &str, original: &str) -> Result<u8, ValueError> {
    u8::from_str_radix(pair, 16).map_err(|_| ValueError::InvalidHexColor(original.to_string()))
}

/// Returns (hue: 0-360, saturation: 0-100, value: 0-100).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let value = (max * 100.0).round() as u8;

    let saturation = if max == 0.0 {
        0
    } else {
        ((delta / max) * 100.0).round() as u8
    };

    let hue = if delta < f32::EPSILON {
        0
    } else if (max - r).abs() < f32::EPSILON {
        let h = 60.0 * (((g - b) / delta) % 6.0);
        if h < 0.0 {
            (h + 360.0).round() as u16
        } else {
            h.round() as u16
        }
    } else if (max - g).abs() < f32::EPSILON {
        (60.0 * (((b - r) / delta) + 2.0)).round() as u16
    } else {
        (60.0 * (((r - g) / delta) + 4.0)).round() as u16
    };

    (hue, saturation, value)
}

/// Takes (hue: 0-360, saturation: 0-100, value: 0-100).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn hsv_to_rgb(h: u16, s: u8, v: u8) -> (u8, u8, u8) {
    let s = f32::from(s) / 100.0;
    let v = f32::from(v) / 100.0;
    let h = f32::from(h % 360);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
