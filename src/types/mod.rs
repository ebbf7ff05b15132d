// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for vacuum control.
//!
//! # Types
//!
//! - [`FanSpeed`] / [`FanSpeedLevel`] - Named suction levels and the fan speed codec
//! - [`RunState`] - Semantic lifecycle state decoded from `run_state`
//! - [`Point`] - Target of single-point cleaning
//! - [`Zone`] - Rectangle for zone cleaning
//! - [`Repeats`] - Zone pass count (1-3)

mod area;
mod fan_speed;
mod run_state;

pub use area::{Point, Repeats, Zone};
pub use fan_speed::{FanSpeed, FanSpeedLevel};
pub use run_state::RunState;
