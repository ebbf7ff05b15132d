// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed codec.
//!
//! Maps between the named suction levels shown to users and the integer
//! levels understood by the device. The device also accepts integers beyond
//! the named set, so both directions pass unknown integers through verbatim.
//!
//! # Device Methods
//!
//! Use these with [`Vacuum`](crate::Vacuum):
//! - [`set_fan_speed()`](crate::Vacuum::set_fan_speed) - Encode and send a level
//! - [`fan_speed()`](crate::Vacuum::fan_speed) - Decode the polled level
//! - [`fan_speed_list()`](crate::Vacuum::fan_speed_list) - Named levels in device order

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Named suction levels.
///
/// # Examples
///
/// ```
/// use mirobo_lib::types::{FanSpeed, FanSpeedLevel};
///
/// assert_eq!(FanSpeed::encode("turbo").unwrap(), 3);
/// assert_eq!(FanSpeed::encode("7").unwrap(), 7);
/// assert_eq!(FanSpeed::decode(1), FanSpeedLevel::Named(FanSpeed::Standard));
/// assert_eq!(FanSpeed::decode(7), FanSpeedLevel::Raw(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FanSpeed {
    /// Quietest suction.
    Silent,
    /// Default suction.
    Standard,
    /// Stronger suction.
    Medium,
    /// Maximum suction.
    Turbo,
}

impl FanSpeed {
    /// Every named level.
    pub const ALL: [Self; 4] = [Self::Silent, Self::Standard, Self::Medium, Self::Turbo];

    /// Returns the device integer for this level.
    #[must_use]
    pub const fn value(&self) -> i64 {
        match self {
            Self::Silent => 0,
            Self::Standard => 1,
            Self::Medium => 2,
            Self::Turbo => 3,
        }
    }

    /// Returns the display name of this level.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Silent => "Silent",
            Self::Standard => "Standard",
            Self::Medium => "Medium",
            Self::Turbo => "Turbo",
        }
    }

    /// Returns the named level for a device integer, if there is one.
    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|speed| speed.value() == value)
    }

    /// Returns the named levels sorted by ascending device integer.
    #[must_use]
    pub fn levels() -> Vec<&'static str> {
        let mut all = Self::ALL;
        all.sort_by_key(Self::value);
        all.iter().map(Self::name).collect()
    }

    /// Encodes a user supplied level into the device integer.
    ///
    /// Names are matched case-insensitively. Anything else must parse as an
    /// integer, which is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownFanSpeed`, carrying the valid names, if the
    /// input is neither a known name nor an integer.
    pub fn encode(input: &str) -> Result<i64, ValueError> {
        if let Ok(speed) = input.parse::<Self>() {
            return Ok(speed.value());
        }
        input
            .trim()
            .parse::<i64>()
            .map_err(|_| ValueError::UnknownFanSpeed {
                input: input.to_string(),
                valid: Self::levels(),
            })
    }

    /// Decodes a device integer into a display value.
    #[must_use]
    pub fn decode(level: i64) -> FanSpeedLevel {
        Self::from_value(level).map_or(FanSpeedLevel::Raw(level), FanSpeedLevel::Named)
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValueError::UnknownFanSpeed {
                input: s.to_string(),
                valid: Self::levels(),
            })
    }
}

/// A decoded suction level: a named level, or the raw integer when the
/// device reports something outside the named set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FanSpeedLevel {
    /// One of the named levels.
    Named(FanSpeed),
    /// A device specific level.
    Raw(i64),
}

impl FanSpeedLevel {
    /// Returns the device integer.
    #[must_use]
    pub const fn value(&self) -> i64 {
        match self {
            Self::Named(speed) => speed.value(),
            Self::Raw(level) => *level,
        }
    }
}

impl fmt::Display for FanSpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(speed) => write!(f, "{speed}"),
            Self::Raw(level) => write!(f, "{level}"),
        }
    }
}
