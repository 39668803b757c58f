// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The lightbulb accessory adapter.
//!
//! [`LightAccessory`] sits between the device's remote property list and the
//! accessory's characteristics:
//!
//! - Device snapshots are projected onto the characteristics with
//!   [`update_characteristics`](LightAccessory::update_characteristics).
//! - Characteristic writes from the UI are translated into remote property
//!   writes by the `set_*` methods, or routed through
//!   [`handle_write`](LightAccessory::handle_write).
//!
//! Hue and saturation writes are coalesced: the first of a pair is cached
//! and acknowledged immediately, the second sends the combined color. See
//! [`coalesce`](crate::coalesce) for the transition table.
//!
//! # Examples
//!
//! ```no_run
//! use bulb_bridge::config::AccessoryConfig;
//! use bulb_bridge::error::ProtocolError;
//! use bulb_bridge::property::RemoteProperty;
//! use bulb_bridge::protocol::{PropertyTransport, PropertyWrite};
//! use bulb_bridge::types::{Hue, Percent};
//! use bulb_bridge::LightAccessory;
//!
//! struct CloudApi;
//!
//! impl PropertyTransport for CloudApi {
//!     async fn send_properties(&self, _writes: Vec<PropertyWrite>) -> Result<(), ProtocolError> {
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> bulb_bridge::Result<()> {
//! let accessory = LightAccessory::buffered(AccessoryConfig::new("Desk Lamp", "bulb-01"), CloudApi);
//!
//! accessory.update_characteristics(true, &[RemoteProperty::new("P1501", "80")])?;
//!
//! accessory.set_hue(Hue::new(120)?).await?;          // cached
//! accessory.set_saturation(Percent::new(50)?).await?; // sends "80ff80"
//! # Ok(())
//! # }
//! ```

mod projection;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::characteristic::{CharacteristicStore, CharacteristicValue};
use crate::coalesce::{CoalesceOutcome, CoalesceState, ColorCache, ColorCoalescer, ColorUpdate};
use crate::config::AccessoryConfig;
use crate::error::{Error, Result};
use crate::property::PropertyId;
use crate::protocol::{BufferedWriter, PropertyTransport, PropertyWriter};
use crate::types::{Hue, Percent, PowerState, RgbColor, UiColorTemperature};

/// Adapter for one physical bulb.
///
/// Create one per device and keep it for the lifetime of the bridge. The
/// color cache starts empty and is rebuilt from the next device snapshot
/// after a restart.
///
/// All writes for one accessory are expected to come from one event loop.
/// Coalescing decisions are taken under a lock before any await, so
/// overlapping handlers still see a consistent idle/armed state.
pub struct LightAccessory<W> {
    config: AccessoryConfig,
    writer: W,
    characteristics: Arc<CharacteristicStore>,
    color: Mutex<ColorCoalescer>,
}

impl<T: PropertyTransport> LightAccessory<BufferedWriter<T>> {
    /// Creates an accessory that batches its writes over `transport` using
    /// the window from `config.buffer`.
    #[must_use]
    pub fn buffered(config: AccessoryConfig, transport: T) -> Self {
        let writer = BufferedWriter::with_config(transport, config.buffer);
        Self::new(config, writer)
    }
}

impl<W: PropertyWriter> LightAccessory<W> {
    /// Creates an accessory with an empty characteristic store.
    ///
    /// `config.buffer` is not applied to `writer`; use
    /// [`buffered`](LightAccessory::buffered) to build the writer from it.
    #[must_use]
    pub fn new(config: AccessoryConfig, writer: W) -> Self {
        Self::with_store(config, writer, Arc::new(CharacteristicStore::new()))
    }

    /// Creates an accessory that publishes into an existing characteristic store.
    #[must_use]
    pub fn with_store(
        config: AccessoryConfig,
        writer: W,
        characteristics: Arc<CharacteristicStore>,
    ) -> Self {
        tracing::debug!(
            accessory = %config.name,
            device = %config.device_id,
            "Creating light accessory"
        );
        Self {
            config,
            writer,
            characteristics,
            color: Mutex::new(ColorCoalescer::new()),
        }
    }

    /// Returns the accessory configuration.
    #[must_use]
    pub fn config(&self) -> &AccessoryConfig {
        &self.config
    }

    /// Returns the remote writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Returns the characteristic store this accessory publishes into.
    #[must_use]
    pub fn characteristics(&self) -> &Arc<CharacteristicStore> {
        &self.characteristics
    }

    /// Returns a copy of the color cache.
    #[must_use]
    pub fn color_cache(&self) -> ColorCache {
        self.color.lock().cache()
    }

    /// Returns the coalescing state.
    #[must_use]
    pub fn coalesce_state(&self) -> CoalesceState {
        self.color.lock().state()
    }

    // ========== Characteristic Writes ==========

    /// Routes a characteristic write to its handler.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote write fails.
    pub async fn handle_write(&self, value: CharacteristicValue) -> Result<()> {
        match value {
            CharacteristicValue::On(on) => self.set_on(on).await,
            CharacteristicValue::Brightness(level) => self.set_brightness(level).await,
            CharacteristicValue::ColorTemperature(ct) => self.set_color_temperature(ct).await,
            CharacteristicValue::Hue(hue) => self.set_hue(hue).await,
            CharacteristicValue::Saturation(level) => self.set_saturation(level).await,
        }
    }

    /// Turns the bulb on or off.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote write fails.
    pub async fn set_on(&self, on: bool) -> Result<()> {
        let state = PowerState::from(on);
        self.write_property(PropertyId::Power, state.as_wire().to_string())
            .await?;
        self.characteristics.commit(CharacteristicValue::On(on));
        Ok(())
    }

    /// Sets the brightness. Both sides use 0-100 so the value is sent as is.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote write fails.
    pub async fn set_brightness(&self, level: Percent) -> Result<()> {
        self.write_property(PropertyId::Brightness, level.value().to_string())
            .await?;
        self.characteristics
            .commit(CharacteristicValue::Brightness(level));
        Ok(())
    }

    /// Sets the color temperature, remapped onto the device range.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote write fails.
    pub async fn set_color_temperature(&self, ct: UiColorTemperature) -> Result<()> {
        self.write_property(PropertyId::ColorTemperature, ct.to_device().to_wire())
            .await?;
        self.characteristics
            .commit(CharacteristicValue::ColorTemperature(ct));
        Ok(())
    }

    /// Sets the hue. Only every second color write reaches the device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if this write flushes the color and the
    /// remote write fails.
    pub async fn set_hue(&self, hue: Hue) -> Result<()> {
        self.set_color(ColorUpdate::Hue(hue)).await
    }

    /// Sets the saturation. Only every second color write reaches the device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if this write flushes the color and the
    /// remote write fails.
    pub async fn set_saturation(&self, saturation: Percent) -> Result<()> {
        self.set_color(ColorUpdate::Saturation(saturation)).await
    }

    async fn set_color(&self, update: ColorUpdate) -> Result<()> {
        let value = match update {
            ColorUpdate::Hue(hue) => CharacteristicValue::Hue(hue),
            ColorUpdate::Saturation(level) => CharacteristicValue::Saturation(level),
        };

        let outcome = self.color.lock().record(update);
        if let CoalesceOutcome::Flush { color, ticket } = outcome {
            let hex = RgbColor::from_hsv(&color).to_hex();
            if let Err(e) = self.write_property(PropertyId::Color, hex).await {
                self.color.lock().revert(ticket);
                return Err(e);
            }
        }

        self.characteristics.commit(value);
        Ok(())
    }

    async fn write_property(&self, id: PropertyId, value: String) -> Result<()> {
        tracing::debug!(
            accessory = %self.config.name,
            property = %id,
            value = %value,
            "Writing property"
        );
        self.writer
            .set_buffered_property(id, value)
            .await
            .map_err(|e| {
                tracing::warn!(
                    accessory = %self.config.name,
                    property = %id,
                    error = %e,
                    "Property write failed"
                );
                Error::Protocol(e)
            })
    }
}

impl<W> std::fmt::Debug for LightAccessory<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightAccessory")
            .field("config", &self.config)
            .field("characteristics", &self.characteristics)
            .field("color", &*self.color.lock())
            .finish_non_exhaustive()
    }
}
