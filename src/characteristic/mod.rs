// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic model of the lightbulb accessory.
//!
//! Characteristics are the typed, independently readable and writable
//! values the home-automation UI binds to. This module provides:
//!
//! - [`Characteristic`] - The closed set of characteristics this accessory exposes
//! - [`CharacteristicValue`] - A typed value for one characteristic
//! - [`CharacteristicStore`] - Current values plus change notifications
//!
//! # Examples
//!
//! ```
//! use bulb_bridge::characteristic::{Characteristic, CharacteristicStore, CharacteristicValue};
//!
//! let store = CharacteristicStore::new();
//! store.on_value_changed(|value| println!("{value:?}"));
//!
//! store.update_value(CharacteristicValue::On(true));
//! assert_eq!(store.get(Characteristic::On), Some(CharacteristicValue::On(true)));
//! ```

mod store;

pub use store::{CharacteristicStore, CharacteristicValues, SubscriptionId};

use std::fmt;

use crate::types::{Hue, Percent, UiColorTemperature};

/// The characteristics exposed by the lightbulb service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Characteristic {
    /// Power on/off.
    On,
    /// Brightness, 0-100.
    Brightness,
    /// Color temperature, 153-555.
    ColorTemperature,
    /// Hue, 0-360.
    Hue,
    /// Saturation, 0-100.
    Saturation,
}

impl Characteristic {
    /// Returns the characteristic name as shown by the UI framework.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Brightness => "Brightness",
            Self::ColorTemperature => "ColorTemperature",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value for one characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CharacteristicValue {
    /// Power on/off.
    On(bool),
    /// Brightness level.
    Brightness(Percent),
    /// Color temperature on the characteristic scale.
    ColorTemperature(UiColorTemperature),
    /// Hue angle.
    Hue(Hue),
    /// Saturation level.
    Saturation(Percent),
}

impl CharacteristicValue {
    /// Returns which characteristic this value belongs to.
    #[must_use]
    pub const fn characteristic(&self) -> Characteristic {
        match self {
            Self::On(_) => Characteristic::On,
            Self::Brightness(_) => Characteristic::Brightness,
            Self::ColorTemperature(_) => Characteristic::ColorTemperature,
            Self::Hue(_) => Characteristic::Hue,
            Self::Saturation(_) => Characteristic::Saturation,
        }
    }
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(on) => write!(f, "On={on}"),
            Self::Brightness(level) => write!(f, "Brightness={level}"),
            Self::ColorTemperature(ct) => write!(f, "ColorTemperature={ct}"),
            Self::Hue(hue) => write!(f, "Hue={hue}"),
            Self::Saturation(level) => write!(f, "Saturation={level}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_knows_its_characteristic() {
        assert_eq!(CharacteristicValue::On(true).characteristic(), Characteristic::On);
        assert_eq!(
            CharacteristicValue::Saturation(Percent::MAX).characteristic(),
            Characteristic::Saturation
        );
        assert_eq!(
            CharacteristicValue::ColorTemperature(UiColorTemperature::clamped(300)).characteristic(),
            Characteristic::ColorTemperature
        );
    }

    #[test]
    fn value_display() {
        assert_eq!(CharacteristicValue::On(false).to_string(), "On=false");
        assert_eq!(
            CharacteristicValue::Brightness(Percent::clamped(40)).to_string(),
            "Brightness=40%"
        );
        assert_eq!(CharacteristicValue::Hue(Hue::clamped(90)).to_string(), "Hue=90°");
    }

    #[test]
    fn value_serde() {
        let json = serde_json::to_string(&CharacteristicValue::Hue(Hue::clamped(120))).unwrap();
        assert_eq!(json, r#"{"Hue":120}"#);

        let parsed: CharacteristicValue = serde_json::from_str(r#"{"Brightness":55}"#).unwrap();
        assert_eq!(parsed, CharacteristicValue::Brightness(Percent::clamped(55)));

        assert!(serde_json::from_str::<CharacteristicValue>(r#"{"Hue":400}"#).is_err());
    }
}
