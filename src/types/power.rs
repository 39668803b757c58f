// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of the bulb.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents the power state of the bulb.
///
/// On the wire the device uses the literal strings `"0"` and `"1"`.
///
/// # Examples
///
/// ```
/// use bulb_bridge::types::PowerState;
///
/// assert_eq!(PowerState::On.as_wire(), "1");
/// assert_eq!(PowerState::from(false), PowerState::Off);
/// assert_eq!("1".parse::<PowerState>().unwrap(), PowerState::On);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the device wire representation.
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    /// Returns `true` if the state is [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Off),
            "1" => Ok(Self::On),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerState> for bool {
    fn from(value: PowerState) -> Self {
        value.is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_representation() {
        assert_eq!(PowerState::Off.as_wire(), "0");
        assert_eq!(PowerState::On.as_wire(), "1");
    }

    #[test]
    fn parse_accepts_wire_flags() {
        assert_eq!("0".parse::<PowerState>().unwrap(), PowerState::Off);
        assert_eq!("1".parse::<PowerState>().unwrap(), PowerState::On);
    }

    #[test]
    fn parse_rejects_anything_else() {
        for input in ["2", "on", "OFF", "true", " 1"] {
            assert_eq!(
                input.parse::<PowerState>(),
                Err(ValueError::InvalidPowerState(input.to_string()))
            );
        }
    }

    #[test]
    fn bool_conversions() {
        assert_eq!(PowerState::from(true), PowerState::On);
        assert!(!bool::from(PowerState::Off));
        assert_eq!(PowerState::On.to_string(), "ON");
    }
}
