// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mode independent device commands: suction, docking, locating and the
//! property query.

use serde_json::{Value, json};

use crate::command::Command;
use crate::state::ALL_PROPS;

/// `set_suction` command carrying an encoded fan speed level.
///
/// # Examples
///
/// ```
/// use mirobo_lib::command::{Command, SuctionCommand};
/// use mirobo_lib::types::FanSpeed;
/// use serde_json::json;
///
/// let cmd = SuctionCommand(FanSpeed::Turbo.value());
/// assert_eq!(cmd.method(), "set_suction");
/// assert_eq!(cmd.params(), vec![json!(3)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuctionCommand(pub i64);

impl Command for SuctionCommand {
    fn method(&self) -> &str {
        "set_suction"
    }

    fn params(&self) -> Vec<Value> {
        vec![json!(self.0)]
    }
}

/// `set_charge` command: return to the dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChargeCommand;

impl Command for ChargeCommand {
    fn method(&self) -> &str {
        "set_charge"
    }

    fn params(&self) -> Vec<Value> {
        vec![json!(1)]
    }
}

/// `set_resetpos` command: make the vacuum beep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocateCommand;

impl Command for LocateCommand {
    fn method(&self) -> &str {
        "set_resetpos"
    }

    fn params(&self) -> Vec<Value> {
        vec![json!(1)]
    }
}

/// `get_prop` command.
///
/// The response is positional: value *i* belongs to property *i*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPropCommand {
    props: &'static [&'static str],
}

impl GetPropCommand {
    /// Queries every property of the snapshot, in snapshot order.
    #[must_use]
    pub const fn all() -> Self {
        Self { props: &ALL_PROPS }
    }

    /// Returns the requested property names.
    #[must_use]
    pub const fn props(&self) -> &'static [&'static str] {
        self.props
    }
}

impl Default for GetPropCommand {
    fn default() -> Self {
        Self::all()
    }
}

impl Command for GetPropCommand {
    fn method(&self) -> &str {
        "get_prop"
    }

    fn params(&self) -> Vec<Value> {
        self.props.iter().map(|name| json!(name)).collect()
    }
}
