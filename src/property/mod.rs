// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote property model of the bulb.
//!
//! The device reports its state as an unordered list of `(pid, value)`
//! pairs where every value is a string. Only four property ids are
//! understood; anything else decodes to `None` and is skipped by the
//! projection so newer firmware can add properties freely.
//!
//! # Examples
//!
//! ```
//! use bulb_bridge::property::{PropertyId, PropertySnapshot};
//!
//! let snapshot = PropertySnapshot::from_json(
//!     r#"{"power": true, "properties": [{"pid": "P1501", "value": "80"}]}"#,
//! ).unwrap();
//!
//! assert!(snapshot.power());
//! assert_eq!(snapshot.properties()[0].id(), Some(PropertyId::Brightness));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Known remote property identifiers.
///
/// The codes are a stable wire contract with the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyId {
    /// Power flag, `"0"` or `"1"`.
    Power,
    /// Brightness, 0-100.
    Brightness,
    /// Color temperature, 1800-6500.
    ColorTemperature,
    /// RGB color as six hex digits.
    Color,
}

impl PropertyId {
    /// All known properties.
    pub const ALL: [Self; 4] = [
        Self::Power,
        Self::Brightness,
        Self::ColorTemperature,
        Self::Color,
    ];

    /// Returns the wire code of this property.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Power => "P3",
            Self::Brightness => "P1501",
            Self::ColorTemperature => "P1502",
            Self::Color => "P1507",
        }
    }

    /// Looks up a property by wire code. Unknown codes return `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.code() == code)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single `(pid, value)` pair as reported by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProperty {
    pid: String,
    value: String,
}

impl RemoteProperty {
    /// Creates a property from its raw wire code and value.
    #[must_use]
    pub fn new(pid: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            value: value.into(),
        }
    }

    /// Creates a property for a known id.
    #[must_use]
    pub fn known(id: PropertyId, value: impl Into<String>) -> Self {
        Self::new(id.code(), value)
    }

    /// Returns the raw wire code.
    #[must_use]
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Returns the raw string value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the decoded id, or `None` for properties this bridge does not know.
    #[must_use]
    pub fn id(&self) -> Option<PropertyId> {
        PropertyId::from_code(&self.pid)
    }
}

/// A full device state report: the power flag plus the property list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertySnapshot {
    power: bool,
    #[serde(default)]
    properties: Vec<RemoteProperty>,
}

impl PropertySnapshot {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub fn new(power: bool, properties: Vec<RemoteProperty>) -> Self {
        Self { power, properties }
    }

    /// Decodes a snapshot from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the document is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Returns the device power flag.
    #[must_use]
    pub fn power(&self) -> bool {
        self.power
    }

    /// Returns the reported properties in report order.
    #[must_use]
    pub fn properties(&self) -> &[RemoteProperty] {
        &self.properties
    }
}
