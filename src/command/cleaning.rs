// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cleaning control commands.
//!
//! This module provides the three command families that start, pause and
//! stop a cleaning job: plain mode switching, room cleaning with a mop
//! selector, and single-point cleaning.

use serde_json::{Value, json};

use crate::command::Command;
use crate::types::Point;

/// Action code shared by the cleaning command families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanAction {
    /// Stop the job.
    Stop,
    /// Start or resume the job.
    Start,
    /// Pause on the older firmware generation.
    LegacyPause,
    /// Pause on the mode-aware firmware generation.
    Pause,
}

impl CleanAction {
    /// Returns the action code sent to the device.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Stop => 0,
            Self::Start => 1,
            Self::LegacyPause => 2,
            Self::Pause => 3,
        }
    }
}

/// `set_mode` command.
///
/// # Examples
///
/// ```
/// use mirobo_lib::command::{CleanAction, Command, ModeCommand};
/// use serde_json::json;
///
/// assert_eq!(ModeCommand::Stop.params(), vec![json!(0)]);
///
/// let edge = ModeCommand::Edge(CleanAction::Pause);
/// assert_eq!(edge.params(), vec![json!(3), json!(3)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeCommand {
    /// Stop room cleaning.
    Stop,
    /// Drive the edge/manual cleaning mode.
    Edge(CleanAction),
}

impl ModeCommand {
    /// Mode number of edge/manual cleaning.
    pub const EDGE_MODE: i64 = 3;
}

impl Command for ModeCommand {
    fn method(&self) -> &str {
        "set_mode"
    }

    fn params(&self) -> Vec<Value> {
        match self {
            Self::Stop => vec![json!(0)],
            Self::Edge(action) => vec![json!(Self::EDGE_MODE), json!(action.code())],
        }
    }
}

/// `set_mode_withroom` command.
///
/// The first parameter tells the device whether mopping is engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomCleanCommand {
    /// Action mode selector.
    pub action_mode: i64,
    /// What to do.
    pub action: CleanAction,
}

impl RoomCleanCommand {
    /// Creates a room cleaning command.
    #[must_use]
    pub const fn new(action_mode: i64, action: CleanAction) -> Self {
        Self {
            action_mode,
            action,
        }
    }
}

impl Command for RoomCleanCommand {
    fn method(&self) -> &str {
        "set_mode_withroom"
    }

    fn params(&self) -> Vec<Value> {
        vec![json!(self.action_mode), json!(self.action.code()), json!(0)]
    }
}

/// `set_pointclean` command.
///
/// # Examples
///
/// ```
/// use mirobo_lib::command::{CleanAction, Command, PointCleanCommand};
/// use mirobo_lib::types::Point;
/// use serde_json::json;
///
/// let start = PointCleanCommand::new(CleanAction::Start, Point::new(150, 200));
/// assert_eq!(start.params(), vec![json!(1), json!(150), json!(200)]);
///
/// assert_eq!(PointCleanCommand::stop().params(), vec![json!(0), json!(0), json!(0)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCleanCommand {
    /// What to do.
    pub action: CleanAction,
    /// Target point.
    pub point: Point,
}

impl PointCleanCommand {
    /// Creates a point cleaning command.
    #[must_use]
    pub const fn new(action: CleanAction, point: Point) -> Self {
        Self { action, point }
    }

    /// Creates the command that cancels point cleaning.
    #[must_use]
    pub const fn stop() -> Self {
        Self::new(CleanAction::Stop, Point::new(0, 0))
    }
}

impl Command for PointCleanCommand {
    fn method(&self) -> &str {
        "set_pointclean"
    }

    fn params(&self) -> Vec<Value> {
        vec![
            json!(self.action.code()),
            json!(self.point.x),
            json!(self.point.y),
        ]
    }
}
