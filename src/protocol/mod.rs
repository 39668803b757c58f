// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote write path to the device.
//!
//! The accessory issues one property write per call through a
//! [`PropertyWriter`]. Whatever sits behind it may queue and merge writes
//! before they reach the network.
//!
//! # Writers
//!
//! - [`PropertyWriter`]: the seam the accessory writes through
//! - [`PropertyTransport`]: one network call carrying a batch of writes
//! - [`BufferedWriter`]: a [`PropertyWriter`] that batches writes issued
//!   within a short window into one [`PropertyTransport`] call

mod buffered;

pub use buffered::BufferedWriter;

use std::fmt;
use std::future::Future;

use crate::error::ProtocolError;
use crate::property::PropertyId;

/// A single property write in device wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyWrite {
    /// Target property.
    pub id: PropertyId,
    /// String-encoded value.
    pub value: String,
}

impl PropertyWrite {
    /// Creates a new property write.
    #[must_use]
    pub fn new(id: PropertyId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

impl fmt::Display for PropertyWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.value)
    }
}

/// Trait for the remote side of the accessory.
#[allow(async_fn_in_trait)]
pub trait PropertyWriter {
    /// Writes a single property to the device.
    ///
    /// Resolves once the write has been delivered or has failed.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device or transport rejects the write.
    async fn set_buffered_property(&self, id: PropertyId, value: String)
    -> Result<(), ProtocolError>;
}

/// Trait for transports that deliver a batch of property writes in one call.
pub trait PropertyTransport: Send + Sync + 'static {
    /// Sends all writes to the device in a single request.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    fn send_properties(
        &self,
        writes: Vec<PropertyWrite>,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_write_display() {
        let write = PropertyWrite::new(PropertyId::Color, "ff0000");
        assert_eq!(write.to_string(), "P1507=ff0000");
    }
}
