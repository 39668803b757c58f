// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the device and characteristic sides.
//!
//! Each type ensures values are within their valid ranges at construction
//! time. Wire parsing (`FromStr`) clamps instead of rejecting, so a device
//! reporting a value slightly out of range still projects to a valid
//! characteristic.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off, `"1"`/`"0"` on the wire
//! - [`Percent`] - Brightness and saturation (0-100%)
//! - [`Hue`] - Hue angle (0-360)
//! - [`HsvColor`] - Hue, saturation and value
//! - [`RgbColor`] - Six digit hex codec and RGB/HSV conversion
//! - [`UiColorTemperature`] - Characteristic color temperature (153-555)
//! - [`DeviceColorTemperature`] - Device color temperature (1800-6500)
//! - [`ValueRange`] - Linear remap between two integer ranges

mod color;
mod color_temperature;
mod percent;
mod power;
mod range;
mod rgb_color;

pub use color::{HsvColor, Hue};
pub use color_temperature::{DeviceColorTemperature, UiColorTemperature};
pub use percent::Percent;
pub use power::PowerState;
pub use range::{DEVICE_COLOR_TEMPERATURE, UI_COLOR_TEMPERATURE, ValueRange};
pub use rgb_color::RgbColor;
