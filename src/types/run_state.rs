// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Semantic run state of a vacuum.

use std::fmt;

use serde::Serialize;

/// Lifecycle state derived from the device `run_state` code.
///
/// # Examples
///
/// ```
/// use mirobo_lib::types::RunState;
///
/// assert_eq!(RunState::Docked.as_str(), "docked");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Not doing anything.
    Idle,
    /// A cleaning job is paused.
    Paused,
    /// Cleaning (vacuum, mop, or both).
    Cleaning,
    /// Heading back to the dock.
    Returning,
    /// Sitting on the dock.
    Docked,
    /// The device reported a fault.
    Error,
    /// The code has no entry in the active state table.
    Unknown,
}

impl RunState {
    /// Returns the lowercase state name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Paused => "paused",
            Self::Cleaning => "cleaning",
            Self::Returning => "returning",
            Self::Docked => "docked",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
