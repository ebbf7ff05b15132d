// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for `mirobo_lib`.
//!
//! This module provides the error hierarchy for the translation layer: value
//! validation, transport communication, property snapshot parsing, and
//! facade-level device operations.

use std::fmt;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a property snapshot.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A fan speed input matched neither a named level nor an integer.
    #[error("fan speed step not recognized ({input}). Valid speeds are: {}", valid.join(", "))]
    UnknownFanSpeed {
        /// The input that was rejected.
        input: String,
        /// The valid named levels, in ascending device order.
        valid: Vec<&'static str>,
    },

    /// The device token is not a 32 character hexadecimal string.
    #[error("invalid device token: expected 32 hexadecimal characters, got {0} characters")]
    InvalidToken(usize),

    /// The device host is empty.
    #[error("device host must not be empty")]
    EmptyHost,

    /// An unknown protocol version name was provided.
    #[error("invalid protocol version: {0}")]
    InvalidProtocolVersion(String),
}

/// Which side of the wire a [`ProtocolError`] originated from.
///
/// Both kinds resolve to the same boolean failure for control flow, but they
/// are reported differently in telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The device could not be reached.
    Connectivity,
    /// The device answered but rejected or garbled the exchange.
    Protocol,
}

impl FaultKind {
    /// Returns the label used in log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Protocol => "protocol",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a device transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication with the gateway failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The device returned an error object for the command.
    #[error("device rejected command ({code}): {message}")]
    DeviceRejected {
        /// The device error code.
        code: i64,
        /// The device error message.
        message: String,
    },

    /// The response could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProtocolError {
    /// Classifies this error as a connectivity or a device-protocol fault.
    #[must_use]
    pub fn kind(&self) -> FaultKind {
        match self {
            #[cfg(feature = "http")]
            Self::Http(_) => FaultKind::Connectivity,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::InvalidAddress(_) => {
                FaultKind::Connectivity
            }
            Self::AuthenticationFailed
            | Self::DeviceRejected { .. }
            | Self::MalformedResponse(_) => FaultKind::Protocol,
        }
    }
}

/// Errors related to parsing property snapshots.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The property query returned the wrong number of values.
    #[error("expected {expected} property values, got {actual}")]
    WrongArity {
        /// Number of properties requested.
        expected: usize,
        /// Number of values returned.
        actual: usize,
    },

    /// A property value was not an integer.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The property that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The operation depends on device state that has never been polled.
    #[error("no property snapshot available for {operation}")]
    NoSnapshot {
        /// The operation that required a snapshot.
        operation: &'static str,
    },

    /// The active protocol version does not support the operation.
    #[error("device does not support {capability}")]
    UnsupportedCapability {
        /// The capability that is not supported.
        capability: String,
    },
}

impl Error {
    /// Returns the fault kind for errors that came from the device side.
    ///
    /// Undecodable property responses count as protocol faults. Local
    /// validation and facade errors have no fault kind.
    #[must_use]
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            Self::Protocol(error) => Some(error.kind()),
            Self::Parse(_) => Some(FaultKind::Protocol),
            Self::Value(_) | Self::Device(_) => None,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
