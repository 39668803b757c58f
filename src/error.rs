// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bulb bridge.
//!
//! This module provides the error hierarchy for the adapter: value
//! validation, parsing of remote property values and snapshots, and
//! failures reported by the remote write path.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A remote property write failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A remote property value or snapshot could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// A hue value is outside the valid range (0-360).
    #[error("hue value {0} is out of range [0, 360]")]
    InvalidHue(u16),

    /// A percentage value is outside the valid range (0-100).
    #[error("percentage value {0} is out of range [0, 100]")]
    InvalidPercent(u8),

    /// A hex color string could not be decoded.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// Errors reported by the remote write path.
///
/// A single batched write may settle many callers, so this type is `Clone`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The device or its cloud API rejected the write.
    #[error("write rejected: {0}")]
    Rejected(String),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Internal channel was closed before the write settled.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to parsing remote property values.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a specific property value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The property that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
