// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration.
//!
//! Numeric ranges are a fixed contract between the device and the
//! characteristic layer and are deliberately absent here.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Configuration for one lightbulb accessory.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use bulb_bridge::config::{AccessoryConfig, BufferConfig};
///
/// let config = AccessoryConfig::new("Living Room Lamp", "bulb-0042")
///     .with_buffer(BufferConfig::default().with_window(Duration::from_millis(250)));
///
/// let parsed = AccessoryConfig::from_json(
///     r#"{"name": "Living Room Lamp", "device_id": "bulb-0042", "buffer": {"window_ms": 250}}"#,
/// ).unwrap();
/// assert_eq!(config, parsed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryConfig {
    /// Name shown in the home-automation UI.
    pub name: String,
    /// Vendor identifier of the physical device.
    pub device_id: String,
    /// Remote write batching.
    #[serde(default)]
    pub buffer: BufferConfig,
}

impl AccessoryConfig {
    /// Creates a configuration with the default buffer settings.
    #[must_use]
    pub fn new(name: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_id: device_id.into(),
            buffer: BufferConfig::default(),
        }
    }

    /// Sets the buffer configuration.
    #[must_use]
    pub fn with_buffer(mut self, buffer: BufferConfig) -> Self {
        self.buffer = buffer;
        self
    }

    /// Decodes a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the document is malformed or incomplete.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

/// Remote write batching settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// How long a batch stays open after its first write.
    #[serde(
        rename = "window_ms",
        serialize_with = "serialize_millis",
        deserialize_with = "deserialize_millis"
    )]
    pub window: Duration,
}

impl BufferConfig {
    /// Default batching window.
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(100);

    /// Sets the batching window.
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}

fn deserialize_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AccessoryConfig::new("Lamp", "abc");
        assert_eq!(config.buffer.window, Duration::from_millis(100));
    }

    #[test]
    fn json_without_buffer_uses_default() {
        let config = AccessoryConfig::from_json(r#"{"name": "Lamp", "device_id": "abc"}"#).unwrap();
        assert_eq!(config.buffer, BufferConfig::default());
    }

    #[test]
    fn json_missing_device_id_fails() {
        let result = AccessoryConfig::from_json(r#"{"name": "Lamp"}"#);
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn buffer_window_serializes_as_millis() {
        let buffer = BufferConfig::default().with_window(Duration::from_millis(40));
        assert_eq!(serde_json::to_string(&buffer).unwrap(), r#"{"window_ms":40}"#);
    }
}
