// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Projection of device snapshots onto characteristics.

use std::fmt;

use super::LightAccessory;
use crate::characteristic::CharacteristicValue;
use crate::error::{ParseError, Result};
use crate::property::{PropertyId, PropertySnapshot, RemoteProperty};
use crate::protocol::PropertyWriter;
use crate::types::{DeviceColorTemperature, Percent, RgbColor};

impl<W: PropertyWriter> LightAccessory<W> {
    /// Projects a device snapshot onto the characteristics.
    ///
    /// # Errors
    ///
    /// See [`update_characteristics`](Self::update_characteristics).
    pub fn apply_snapshot(&self, snapshot: &PropertySnapshot) -> Result<()> {
        self.update_characteristics(snapshot.power(), snapshot.properties())
    }

    /// Updates every characteristic from the device's power flag and
    /// property list.
    ///
    /// Properties are applied in list order. Unknown property ids are
    /// ignored. A `P3` entry in the list is ignored too, since `power` is
    /// authoritative. Projecting the same snapshot twice leaves the
    /// characteristics unchanged the second time.
    ///
    /// # Errors
    ///
    /// Returns the first `Error::Parse` for a malformed value. Every
    /// well-formed property is still applied.
    pub fn update_characteristics(&self, power: bool, properties: &[RemoteProperty]) -> Result<()> {
        tracing::trace!(
            accessory = %self.config.name,
            power,
            properties = properties.len(),
            "Projecting device snapshot"
        );
        self.characteristics.update_value(CharacteristicValue::On(power));

        let mut first_error = None;
        for property in properties {
            if let Err(e) = self.project_property(property) {
                tracing::warn!(
                    accessory = %self.config.name,
                    pid = property.pid(),
                    value = property.value(),
                    error = %e,
                    "Skipping malformed property"
                );
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn project_property(&self, property: &RemoteProperty) -> std::result::Result<(), ParseError> {
        let Some(id) = property.id() else {
            tracing::trace!(pid = property.pid(), "Ignoring unknown property");
            return Ok(());
        };
        let raw = property.value();

        match id {
            PropertyId::Power => {}
            PropertyId::Brightness => {
                let level: Percent = raw.parse().map_err(|e| invalid_value(id, e))?;
                self.characteristics
                    .update_value(CharacteristicValue::Brightness(level));
            }
            PropertyId::ColorTemperature => {
                let ct: DeviceColorTemperature = raw.parse().map_err(|e| invalid_value(id, e))?;
                self.characteristics
                    .update_value(CharacteristicValue::ColorTemperature(ct.to_ui()));
            }
            PropertyId::Color => {
                let color = RgbColor::from_hex(raw)
                    .map_err(|e| invalid_value(id, e))?
                    .to_hsv();
                self.characteristics
                    .update_value(CharacteristicValue::Hue(color.hue()));
                self.characteristics
                    .update_value(CharacteristicValue::Saturation(color.saturation()));
                self.color.lock().apply_remote(color);
            }
        }
        Ok(())
    }
}

fn invalid_value(id: PropertyId, error: impl fmt::Display) -> ParseError {
    ParseError::InvalidValue {
        field: id.code().to_string(),
        message: error.to_string(),
    }
}
