// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command encoders.
//!
//! An encoder turns a high-level [`Operation`] plus the current device
//! context into the [`CommandSequence`] to send. Two firmware generations
//! exist and they disagree on almost every command, so each one gets its
//! own [`CommandEncoder`]. The [`ProtocolVersion`] chosen for a device picks
//! the encoder once; it never changes for the life of the device.
//!
//! Encoders are pure: they never talk to the device and never mutate the
//! context. Side effects on the cached clean point are returned as a
//! [`PointUpdate`] for the caller to apply.
//!
//! # Examples
//!
//! ```
//! use mirobo_lib::command::Command;
//! use mirobo_lib::encoder::{EncodeContext, Operation, ProtocolVersion};
//!
//! let encoded = ProtocolVersion::Legacy
//!     .encoder()
//!     .encode(&Operation::Start, &EncodeContext::default())
//!     .unwrap();
//!
//! assert_eq!(encoded.sequence.steps()[0].method(), "set_mode_withroom");
//! ```

mod legacy;
mod mode_aware;

pub use legacy::LegacyEncoder;
pub use mode_aware::{CleaningMode, ModeAwareEncoder, room_action_mode};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::command::{
    ChargeCommand, CommandSequence, LocateCommand, RawCommand, SuctionCommand,
};
use crate::error::{DeviceError, Error, ValueError};
use crate::state::PropertySnapshot;
use crate::types::{Point, Repeats, Zone};

/// A high-level request against the vacuum.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Start or resume cleaning.
    Start,
    /// Pause cleaning.
    Pause,
    /// Stop cleaning.
    Stop,
    /// Go back to the dock.
    ReturnToBase,
    /// Beep so the vacuum can be found.
    Locate,
    /// Set the suction level to an encoded fan speed.
    SetFanSpeed(i64),
    /// Send an arbitrary raw command.
    SendCommand(RawCommand),
    /// Clean rectangles, each `repeats` times.
    CleanZone {
        /// Rectangles to clean.
        zones: Vec<Zone>,
        /// Passes per rectangle.
        repeats: Repeats,
    },
    /// Clean around a single point.
    CleanPoint(Point),
}

impl Operation {
    /// Returns a short name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::ReturnToBase => "return_to_base",
            Self::Locate => "locate",
            Self::SetFanSpeed(_) => "set_fan_speed",
            Self::SendCommand(_) => "send_command",
            Self::CleanZone { .. } => "clean_zone",
            Self::CleanPoint(_) => "clean_point",
        }
    }

    /// Returns the message logged when the operation fails.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::Start => "Unable to start the vacuum",
            Self::Pause => "Unable to set pause",
            Self::Stop => "Unable to stop",
            Self::ReturnToBase => "Unable to return home",
            Self::Locate => "Unable to locate the botvac",
            Self::SetFanSpeed(_) => "Unable to set fan speed",
            Self::SendCommand(_) => "Unable to send command to the vacuum",
            Self::CleanZone { .. } => "Unable to clean zone",
            Self::CleanPoint(_) => "Unable to clean point",
        }
    }
}

/// What an encoder may look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeContext<'a> {
    /// The most recent snapshot, if any poll has succeeded.
    pub snapshot: Option<&'a PropertySnapshot>,
    /// The cached target of the last point cleaning request.
    pub last_clean_point: Option<Point>,
}

impl<'a> EncodeContext<'a> {
    /// Creates a context.
    #[must_use]
    pub const fn new(snapshot: Option<&'a PropertySnapshot>, last_clean_point: Option<Point>) -> Self {
        Self {
            snapshot,
            last_clean_point,
        }
    }
}

/// Change to the cached clean point requested by an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointUpdate {
    /// Leave the cached point alone.
    #[default]
    Keep,
    /// Replace the cached point.
    Set(Point),
    /// Forget the cached point.
    Clear,
}

impl PointUpdate {
    /// Applies this update to a cached point.
    pub fn apply(self, cached: &mut Option<Point>) {
        match self {
            Self::Keep => {}
            Self::Set(point) => *cached = Some(point),
            Self::Clear => *cached = None,
        }
    }
}

/// Encoder output: the commands to send and the clean point update.
///
/// The point update takes effect before the commands are sent, whatever
/// their outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Commands to send, in order, with short-circuit on failure.
    pub sequence: CommandSequence,
    /// Clean point update.
    pub point_update: PointUpdate,
}

impl Encoded {
    /// Wraps a sequence that leaves the clean point alone.
    #[must_use]
    pub fn keep(sequence: CommandSequence) -> Self {
        Self {
            sequence,
            point_update: PointUpdate::Keep,
        }
    }
}

/// Translates operations into raw commands for one firmware generation.
pub trait CommandEncoder: fmt::Debug + Send + Sync {
    /// Returns the protocol version this encoder speaks.
    fn version(&self) -> ProtocolVersion;

    /// Encodes an operation.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::NoSnapshot` when the operation depends on device
    /// state that was never polled, or `DeviceError::UnsupportedCapability`
    /// when this generation lacks the operation.
    fn encode(&self, operation: &Operation, context: &EncodeContext<'_>) -> Result<Encoded, Error>;
}

/// Encodes the operations both generations share.
///
/// Generation specific operations that reach this point are unsupported.
fn encode_shared(operation: &Operation) -> Result<Encoded, Error> {
    let message = operation.failure_message();
    let sequence = match operation {
        Operation::ReturnToBase => CommandSequence::single(message, &ChargeCommand),
        Operation::Locate => CommandSequence::single(message, &LocateCommand),
        Operation::SetFanSpeed(level) => CommandSequence::single(message, &SuctionCommand(*level)),
        Operation::SendCommand(raw) => CommandSequence::single(message, raw),
        other => {
            return Err(DeviceError::UnsupportedCapability {
                capability: other.name().to_string(),
            }
            .into());
        }
    };
    Ok(Encoded::keep(sequence))
}

/// Firmware generation of a device; selects its encoder and state table.
///
/// # Examples
///
/// ```
/// use mirobo_lib::encoder::ProtocolVersion;
///
/// let version: ProtocolVersion = "legacy".parse().unwrap();
/// assert_eq!(version.encoder().version(), ProtocolVersion::Legacy);
/// assert_eq!(ProtocolVersion::default(), ProtocolVersion::ModeAware);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolVersion {
    /// Older firmware: no point or zone cleaning, mode ignored.
    Legacy,
    /// Newer firmware: mode aware, with point and zone cleaning.
    #[default]
    ModeAware,
}

impl ProtocolVersion {
    /// Returns the encoder for this version.
    #[must_use]
    pub fn encoder(self) -> &'static dyn CommandEncoder {
        match self {
            Self::Legacy => &LegacyEncoder,
            Self::ModeAware => &ModeAwareEncoder,
        }
    }

    /// Returns the configuration name of this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::ModeAware => "mode_aware",
        }
    }

    /// Returns `true` if zone and point cleaning are available.
    #[must_use]
    pub const fn supports_targeted_cleaning(&self) -> bool {
        matches!(self, Self::ModeAware)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "legacy" => Ok(Self::Legacy),
            "mode_aware" => Ok(Self::ModeAware),
            _ => Err(ValueError::InvalidProtocolVersion(s.to_string())),
        }
    }
}
