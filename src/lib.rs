// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulb Bridge - Adapts a smart bulb's remote property list to a
//! HomeKit-style lightbulb accessory.
//!
//! The device reports and accepts a handful of string-encoded properties
//! (`P3` power, `P1501` brightness, `P1502` color temperature, `P1507` RGB
//! hex color). The UI side works with typed characteristics (On,
//! Brightness, ColorTemperature, Hue, Saturation). This crate translates
//! between the two in both directions.
//!
//! # Supported Features
//!
//! - **Projection**: device snapshots update every characteristic
//! - **Range remap**: color temperature 1800-6500 on the device, 153-555 in the UI
//! - **Color conversion**: RGB hex on the device, hue/saturation in the UI
//! - **Coalescing**: a hue write and a saturation write become one color write
//! - **Buffered writes**: writes within a short window share one network call
//!
//! # Quick Start
//!
//! ```no_run
//! use bulb_bridge::config::AccessoryConfig;
//! use bulb_bridge::error::ProtocolError;
//! use bulb_bridge::property::PropertySnapshot;
//! use bulb_bridge::protocol::{PropertyTransport, PropertyWrite};
//! use bulb_bridge::{CharacteristicValue, LightAccessory};
//!
//! struct CloudApi;
//!
//! impl PropertyTransport for CloudApi {
//!     async fn send_properties(&self, _writes: Vec<PropertyWrite>) -> Result<(), ProtocolError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> bulb_bridge::Result<()> {
//!     let accessory = LightAccessory::buffered(AccessoryConfig::new("Hallway", "bulb-7"), CloudApi);
//!
//!     accessory.characteristics().on_value_changed(|value| {
//!         println!("device reported {value}");
//!     });
//!
//!     // Device side: poll result
//!     let snapshot = PropertySnapshot::from_json(
//!         r#"{"power": true, "properties": [{"pid": "P1507", "value": "ff0000"}]}"#,
//!     )?;
//!     accessory.apply_snapshot(&snapshot)?;
//!
//!     // UI side: user switched the light off
//!     accessory.handle_write(CharacteristicValue::On(false)).await?;
//!     Ok(())
//! }
//! ```

mod accessory;
pub mod characteristic;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod property;
pub mod protocol;
pub mod types;

pub use accessory::LightAccessory;
pub use characteristic::{Characteristic, CharacteristicStore, CharacteristicValue, SubscriptionId};
pub use coalesce::{CoalesceState, ColorCache};
pub use config::{AccessoryConfig, BufferConfig};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use property::{PropertyId, PropertySnapshot, RemoteProperty};
pub use protocol::{BufferedWriter, PropertyTransport, PropertyWrite, PropertyWriter};
pub use types::{
    DeviceColorTemperature, HsvColor, Hue, Percent, PowerState, RgbColor, UiColorTemperature,
};
