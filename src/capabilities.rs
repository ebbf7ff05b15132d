// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Supported features of a vacuum.
//!
//! Both firmware generations share the basic control surface. Zone and
//! point cleaning exist only on mode-aware firmware.

use crate::encoder::ProtocolVersion;

/// Features a vacuum supports.
///
/// # Examples
///
/// ```
/// use mirobo_lib::Capabilities;
/// use mirobo_lib::encoder::ProtocolVersion;
///
/// let legacy = Capabilities::for_version(ProtocolVersion::Legacy);
/// assert!(legacy.fan_speed);
/// assert!(!legacy.clean_zone);
///
/// let aware = Capabilities::for_version(ProtocolVersion::ModeAware);
/// assert!(aware.clean_zone && aware.clean_point);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
// Independent feature flags.
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Reports a run state.
    pub state: bool,
    /// Can start cleaning.
    pub start: bool,
    /// Can pause cleaning.
    pub pause: bool,
    /// Can stop cleaning.
    pub stop: bool,
    /// Can return to the dock.
    pub return_home: bool,
    /// Supports suction levels.
    pub fan_speed: bool,
    /// Can beep to be found.
    pub locate: bool,
    /// Accepts raw commands.
    pub send_command: bool,
    /// Reports a battery level.
    pub battery: bool,
    /// Supports rectangular zone cleaning.
    pub clean_zone: bool,
    /// Supports single point cleaning.
    pub clean_point: bool,
}

impl Capabilities {
    /// Returns the features of a firmware generation.
    #[must_use]
    pub const fn for_version(version: ProtocolVersion) -> Self {
        let targeted = version.supports_targeted_cleaning();
        Self {
            state: true,
            start: true,
            pause: true,
            stop: true,
            return_home: true,
            fan_speed: true,
            locate: true,
            send_command: true,
            battery: true,
            clean_zone: targeted,
            clean_point: targeted,
        }
    }

    /// Returns the names of the supported features.
    #[must_use]
    pub fn supported(&self) -> Vec<&'static str> {
        [
            (self.state, "state"),
            (self.start, "start"),
            (self.pause, "pause"),
            (self.stop, "stop"),
            (self.return_home, "return_home"),
            (self.fan_speed, "fan_speed"),
            (self.locate, "locate"),
            (self.send_command, "send_command"),
            (self.battery, "battery"),
            (self.clean_zone, "clean_zone"),
            (self.clean_point, "clean_point"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::for_version(ProtocolVersion::default())
    }
}
