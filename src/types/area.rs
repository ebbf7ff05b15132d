// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map geometry for targeted cleaning.
//!
//! Coordinates are device map units, passed to the device unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single target point on the device map.
///
/// # Examples
///
/// ```
/// use mirobo_lib::types::Point;
///
/// let point = Point::from((150, 200));
/// assert_eq!(point.x, 150);
/// assert_eq!(point.y, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal map coordinate.
    pub x: i32,
    /// Vertical map coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangular cleaning zone given by two opposite corners.
///
/// Service payloads carry zones as `(x1, y2, x2, y1)` tuples; use
/// [`Zone::from_tuple`] for those. Deserialization accepts both that
/// four element sequence and an object with named corners.
///
/// # Examples
///
/// ```
/// use mirobo_lib::types::Zone;
///
/// let zone = Zone::new(0, 0, 100, 100);
/// assert_eq!(zone.corners(), [0, 0, 0, 100, 100, 100, 100, 0]);
/// assert_eq!(Zone::from_tuple((0, 100, 100, 0)), zone);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ZoneRepr")]
pub struct Zone {
    /// First corner, horizontal.
    pub x1: i32,
    /// First corner, vertical.
    pub y1: i32,
    /// Opposite corner, horizontal.
    pub x2: i32,
    /// Opposite corner, vertical.
    pub y2: i32,
}

impl Zone {
    /// Creates a zone from corner `(x1, y1)` to corner `(x2, y2)`.
    #[must_use]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a zone from a service tuple ordered `(x1, y2, x2, y1)`.
    #[must_use]
    pub const fn from_tuple((x1, y2, x2, y1): (i32, i32, i32, i32)) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the rectangle as the vertex walk the device expects:
    /// `x1, y1, x1, y2, x2, y2, x2, y1`.
    #[must_use]
    pub const fn corners(&self) -> [i32; 8] {
        [
            self.x1, self.y1, self.x1, self.y2, self.x2, self.y2, self.x2, self.y1,
        ]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZoneRepr {
    Tuple(i32, i32, i32, i32),
    Corners { x1: i32, y1: i32, x2: i32, y2: i32 },
}

impl From<ZoneRepr> for Zone {
    fn from(repr: ZoneRepr) -> Self {
        match repr {
            ZoneRepr::Tuple(x1, y2, x2, y1) => Self::from_tuple((x1, y2, x2, y1)),
            ZoneRepr::Corners { x1, y1, x2, y2 } => Self::new(x1, y1, x2, y2),
        }
    }
}

/// How many times each zone is cleaned (1-3).
///
/// Out of range requests are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64")]
pub struct Repeats(u8);

impl Repeats {
    /// Minimum repeat count.
    pub const MIN: u8 = 1;

    /// Maximum repeat count.
    pub const MAX: u8 = 3;

    /// A single pass.
    pub const ONCE: Self = Self(1);

    /// Creates a repeat count, clamping to the valid range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // Clamped into 1..=3 above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(clamped as u8)
    }

    /// Returns the repeat count.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl From<i64> for Repeats {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl Default for Repeats {
    fn default() -> Self {
        Self::ONCE
    }
}

impl fmt::Display for Repeats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
