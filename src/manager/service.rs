// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Targeted cleaning service calls.

use serde::{Deserialize, Serialize};

use crate::device::Vacuum;
use crate::protocol::DeviceTransport;
use crate::types::{Point, Repeats, Zone};

/// A zone or point cleaning request addressed to one or more vacuums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum ServiceCall {
    /// Clean rectangles.
    CleanZone {
        /// Rectangles to clean.
        zones: Vec<Zone>,
        /// Passes per rectangle.
        #[serde(default)]
        repeats: Repeats,
    },
    /// Clean around one point.
    CleanPoint {
        /// Target point.
        point: Point,
    },
}

impl ServiceCall {
    /// Creates a zone call, clamping `repeats` into 1-3.
    #[must_use]
    pub fn clean_zone(zones: Vec<Zone>, repeats: i64) -> Self {
        Self::CleanZone {
            zones,
            repeats: Repeats::clamped(repeats),
        }
    }

    /// Creates a point call.
    #[must_use]
    pub fn clean_point(point: impl Into<Point>) -> Self {
        Self::CleanPoint {
            point: point.into(),
        }
    }

    /// Returns the service name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CleanZone { .. } => "clean_zone",
            Self::CleanPoint { .. } => "clean_point",
        }
    }

    pub(crate) async fn apply<T: DeviceTransport>(&self, vacuum: &Vacuum<T>) -> bool {
        match self {
            Self::CleanZone { zones, repeats } => vacuum.clean_zone(zones, *repeats).await,
            Self::CleanPoint { point } => vacuum.clean_point(*point).await,
        }
    }
}
