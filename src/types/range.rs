// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear range remapping between numeric encodings.
//!
//! The device and the characteristic layer disagree on the scale used for
//! color temperature. [`ValueRange::remap`] normalizes a value within its
//! source range to a fraction and projects that fraction onto the
//! destination range. Source min always maps to destination min, so the
//! direction of the mapping is encoded purely by which range is the source.

/// An inclusive integer range `[min, max]` with `min < max`.
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::ValueRange;
///
/// let from = ValueRange::new(0, 10);
/// let to = ValueRange::new(100, 200);
/// assert_eq!(from.remap(5, &to), 150);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min: i64,
    max: i64,
}

/// Native color temperature range reported and accepted by the device.
pub const DEVICE_COLOR_TEMPERATURE: ValueRange = ValueRange::new(1800, 6500);

/// Color temperature range exposed on the characteristic side.
pub const UI_COLOR_TEMPERATURE: ValueRange = ValueRange::new(153, 555);

impl ValueRange {
    /// Creates a new range.
    ///
    /// # Panics
    ///
    /// Panics if `min` is not strictly less than `max`.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        assert!(min < max, "range minimum must be below its maximum");
        Self { min, max }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Saturates `value` into the range.
    #[must_use]
    pub const fn clamp(&self, value: i64) -> i64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Position of `value` within the range, `0.0` at `min` and `1.0` at `max`.
    ///
    /// Values outside the range produce fractions outside `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normalize(&self, value: i64) -> f64 {
        (value - self.min) as f64 / (self.max - self.min) as f64
    }

    /// Inverse of [`normalize`](Self::normalize), rounded to the nearest integer.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn project(&self, fraction: f64) -> i64 {
        (fraction * (self.max - self.min) as f64 + self.min as f64).round() as i64
    }

    /// Maps `value` from this range onto `target`.
    #[must_use]
    pub fn remap(&self, value: i64, target: &ValueRange) -> i64 {
        target.project(self.normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bounds() {
        let range = ValueRange::new(1800, 6500);
        assert!(range.normalize(1800).abs() < f64::EPSILON);
        assert!((range.normalize(6500) - 1.0).abs() < f64::EPSILON);
        assert!((range.normalize(4150) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn project_rounds_to_nearest() {
        let range = ValueRange::new(0, 3);
        assert_eq!(range.project(0.5), 2);
        assert_eq!(range.project(0.1), 0);
        assert_eq!(range.project(1.0), 3);
    }

    #[test]
    fn remap_boundaries() {
        assert_eq!(DEVICE_COLOR_TEMPERATURE.remap(1800, &UI_COLOR_TEMPERATURE), 153);
        assert_eq!(DEVICE_COLOR_TEMPERATURE.remap(6500, &UI_COLOR_TEMPERATURE), 555);
        assert_eq!(UI_COLOR_TEMPERATURE.remap(153, &DEVICE_COLOR_TEMPERATURE), 1800);
        assert_eq!(UI_COLOR_TEMPERATURE.remap(555, &DEVICE_COLOR_TEMPERATURE), 6500);
    }

    #[test]
    fn remap_out_of_range_extrapolates() {
        // Unclamped remap is linear past the bounds.
        assert!(DEVICE_COLOR_TEMPERATURE.remap(7000, &UI_COLOR_TEMPERATURE) > 555);
        assert!(DEVICE_COLOR_TEMPERATURE.remap(1000, &UI_COLOR_TEMPERATURE) < 153);
    }

    #[test]
    fn clamp_saturates_at_bounds() {
        let range = ValueRange::new(153, 555);
        assert_eq!(range.clamp(100), 153);
        assert_eq!(range.clamp(600), 555);
        assert_eq!(range.clamp(300), 300);
    }

    #[test]
    fn remap_round_trip_is_stable() {
        for v in DEVICE_COLOR_TEMPERATURE.min()..=DEVICE_COLOR_TEMPERATURE.max() {
            let ui = DEVICE_COLOR_TEMPERATURE.remap(v, &UI_COLOR_TEMPERATURE);
            let device = UI_COLOR_TEMPERATURE.remap(ui, &DEVICE_COLOR_TEMPERATURE);
            let again = DEVICE_COLOR_TEMPERATURE.remap(device, &UI_COLOR_TEMPERATURE);
            assert!((again - ui).abs() <= 1, "unstable round trip for {v}");
        }
    }
}
