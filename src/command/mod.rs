// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw command definitions.
//!
//! The device speaks a positional protocol: every command is a method name
//! plus an ordered list of integer (or string) parameters. This module
//! provides typed builders for each method and the [`RawCommand`] descriptor
//! they all reduce to.
//!
//! # Available Commands
//!
//! | Command Type | Method | Params |
//! |-------------|--------|--------|
//! | [`ModeCommand`] | `set_mode` | `[0]` or `[3, action]` |
//! | [`RoomCleanCommand`] | `set_mode_withroom` | `[actionMode, action, 0]` |
//! | [`PointCleanCommand`] | `set_pointclean` | `[action, x, y]` |
//! | [`UploadMapCommand`] | `set_uploadmap` | `[0]` or `[1]` |
//! | [`ZoneCommand`] | `set_zone` | `[count, entries...]` |
//! | [`SuctionCommand`] | `set_suction` | `[level]` |
//! | [`ChargeCommand`] | `set_charge` | `[1]` |
//! | [`LocateCommand`] | `set_resetpos` | `[1]` |
//! | [`GetPropCommand`] | `get_prop` | `[names...]` |
//!
//! # Examples
//!
//! ```
//! use mirobo_lib::command::{CleanAction, Command, RoomCleanCommand};
//! use serde_json::json;
//!
//! let cmd = RoomCleanCommand::new(3, CleanAction::Start);
//! assert_eq!(cmd.method(), "set_mode_withroom");
//! assert_eq!(cmd.params(), vec![json!(3), json!(1), json!(0)]);
//! ```

mod cleaning;
mod device;
mod map;
mod sequence;

pub use cleaning::{CleanAction, ModeCommand, PointCleanCommand, RoomCleanCommand};
pub use device::{ChargeCommand, GetPropCommand, LocateCommand, SuctionCommand};
pub use map::{UploadMapCommand, ZoneCommand};
pub use sequence::{CommandSequence, SequenceOutcome};

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command that can be sent to the device.
pub trait Command {
    /// Returns the raw method name, for example `"set_mode"`.
    fn method(&self) -> &str;

    /// Returns the positional parameters.
    fn params(&self) -> Vec<Value>;

    /// Reduces the command to a raw descriptor.
    fn to_raw(&self) -> RawCommand {
        RawCommand::new(self.method(), self.params())
    }
}

/// A method name with its positional parameters, ready for a transport.
///
/// This is also the pass-through type for `send_command`.
///
/// # Examples
///
/// ```
/// use mirobo_lib::command::RawCommand;
///
/// let cmd = RawCommand::new("set_mode", vec![serde_json::json!(0)]);
/// assert_eq!(cmd.to_string(), "set_mode [0]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    method: String,
    #[serde(default)]
    params: Vec<Value>,
}

impl RawCommand {
    /// Creates a raw command.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Returns the parameters without cloning.
    #[must_use]
    pub fn params_ref(&self) -> &[Value] {
        &self.params
    }
}

impl Command for RawCommand {
    fn method(&self) -> &str {
        &self.method
    }

    fn params(&self) -> Vec<Value> {
        self.params.clone()
    }

    fn to_raw(&self) -> RawCommand {
        self.clone()
    }
}

impl fmt::Display for RawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, Value::Array(self.params.clone()))
    }
}
