// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run state tables and the attribute view.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::encoder::ProtocolVersion;
use crate::state::PropertySnapshot;
use crate::types::{FanSpeed, FanSpeedLevel, RunState};

const LEGACY_STATES: &[(i64, RunState)] = &[
    (1, RunState::Idle),
    (2, RunState::Idle),
    (3, RunState::Cleaning),
    (4, RunState::Returning),
    (5, RunState::Docked),
];

const MODE_AWARE_STATES: &[(i64, RunState)] = &[
    (0, RunState::Idle),
    (1, RunState::Idle),
    (2, RunState::Paused),
    (3, RunState::Cleaning),
    (4, RunState::Returning),
    (5, RunState::Docked),
    // Vacuum and mop.
    (6, RunState::Cleaning),
    // Mop only.
    (7, RunState::Cleaning),
];

/// Turns snapshots into semantic state for one protocol version.
///
/// Decoding never fails: unknown codes degrade to [`RunState::Unknown`] or a
/// diagnostic attribute string.
///
/// # Examples
///
/// ```
/// use mirobo_lib::encoder::ProtocolVersion;
/// use mirobo_lib::state::{PropertySnapshot, StateDecoder};
/// use mirobo_lib::types::RunState;
///
/// let decoder = StateDecoder::new(ProtocolVersion::ModeAware);
/// let snapshot = PropertySnapshot::new([2, 0, 0, 64, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
///
/// assert_eq!(decoder.decode(&snapshot), RunState::Paused);
/// assert_eq!(decoder.battery_level(Some(&snapshot)), Some(64));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StateDecoder {
    table: &'static [(i64, RunState)],
}

impl StateDecoder {
    /// Creates the decoder for a protocol version.
    #[must_use]
    pub const fn new(version: ProtocolVersion) -> Self {
        let table = match version {
            ProtocolVersion::Legacy => LEGACY_STATES,
            ProtocolVersion::ModeAware => MODE_AWARE_STATES,
        };
        Self { table }
    }

    /// Looks up a run state code without logging.
    #[must_use]
    pub fn lookup(&self, code: i64) -> Option<RunState> {
        self.table
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, state)| *state)
    }

    /// Decodes the snapshot's run state.
    ///
    /// Unmapped codes are logged and yield [`RunState::Unknown`].
    #[must_use]
    pub fn decode(&self, snapshot: &PropertySnapshot) -> RunState {
        let code = snapshot.run_state();
        self.lookup(code).unwrap_or_else(|| {
            tracing::error!(run_state = code, "STATE not supported: {code}");
            RunState::Unknown
        })
    }

    /// Builds the attribute view.
    ///
    /// Before the first poll this is an empty map.
    #[must_use]
    pub fn attributes(&self, snapshot: Option<&PropertySnapshot>) -> StateAttributes {
        let Some(snapshot) = snapshot else {
            return StateAttributes::Map(Map::new());
        };
        match self.lookup(snapshot.run_state()) {
            Some(state) => {
                let mut map = snapshot.to_json_map();
                map.insert("status".to_string(), Value::from(state.as_str()));
                StateAttributes::Map(map)
            }
            None => StateAttributes::Diagnostic(format!(
                "Definition missing for state {}",
                snapshot.run_state()
            )),
        }
    }

    /// Returns the battery percentage, if polled.
    #[must_use]
    pub fn battery_level(&self, snapshot: Option<&PropertySnapshot>) -> Option<i64> {
        snapshot.map(PropertySnapshot::battery_life)
    }

    /// Returns the current fan speed, if polled.
    #[must_use]
    pub fn fan_speed(&self, snapshot: Option<&PropertySnapshot>) -> Option<FanSpeedLevel> {
        snapshot.map(|s| FanSpeed::decode(s.suction_grade()))
    }
}

/// Attribute view of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateAttributes {
    /// Raw fields keyed by wire name plus `status`.
    Map(Map<String, Value>),
    /// The run state code has no definition.
    Diagnostic(String),
}

impl StateAttributes {
    /// Returns the map, if decoding succeeded.
    #[must_use]
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Diagnostic(_) => None,
        }
    }
}
