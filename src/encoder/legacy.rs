// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Encoder for the legacy firmware generation.
//!
//! Legacy firmware ignores `mode`: start and pause always go through
//! `set_mode_withroom` with action mode 0, and stop is always `set_mode [0]`.
//! Zone and point cleaning do not exist.

use crate::command::{CleanAction, CommandSequence, ModeCommand, RoomCleanCommand};
use crate::encoder::{
    CommandEncoder, EncodeContext, Encoded, Operation, ProtocolVersion, encode_shared,
};
use crate::error::{DeviceError, Error};

/// Encoder for firmware without mode-aware commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyEncoder;

const LEGACY_ACTION_MODE: i64 = 0;

fn unsupported(capability: &str) -> Error {
    DeviceError::UnsupportedCapability {
        capability: capability.to_string(),
    }
    .into()
}

impl CommandEncoder for LegacyEncoder {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::Legacy
    }

    fn encode(&self, operation: &Operation, _context: &EncodeContext<'_>) -> Result<Encoded, Error> {
        let sequence = match operation {
            Operation::Start => CommandSequence::single(
                "Unable to start the vacuum",
                &RoomCleanCommand::new(LEGACY_ACTION_MODE, CleanAction::Start),
            ),
            Operation::Pause => CommandSequence::single(
                "Unable to set start/pause",
                &RoomCleanCommand::new(LEGACY_ACTION_MODE, CleanAction::LegacyPause),
            ),
            Operation::Stop => CommandSequence::single("Unable to stop", &ModeCommand::Stop),
            Operation::CleanZone { .. } => return Err(unsupported("zone cleaning")),
            Operation::CleanPoint(_) => return Err(unsupported("point cleaning")),
            shared => return encode_shared(shared),
        };
        Ok(Encoded::keep(sequence))
    }
}
