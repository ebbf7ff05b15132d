// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device cached context.

use std::sync::Arc;

use crate::encoder::PointUpdate;
use crate::state::PropertySnapshot;
use crate::types::Point;

/// State a device connection carries between calls.
///
/// The snapshot is shared as an `Arc` so readers hold a stable copy while
/// a poll swaps in a new one.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    snapshot: Option<Arc<PropertySnapshot>>,
    available: bool,
    last_clean_point: Option<Point>,
}

impl OperationContext {
    /// Creates an empty, unavailable context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<PropertySnapshot>> {
        self.snapshot.clone()
    }

    /// Returns `true` if the last poll succeeded.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the cached clean point.
    #[must_use]
    pub fn last_clean_point(&self) -> Option<Point> {
        self.last_clean_point
    }

    /// Stores a fresh snapshot and marks the device available.
    ///
    /// Returns the shared handle to the stored snapshot.
    pub fn replace_snapshot(&mut self, snapshot: PropertySnapshot) -> Arc<PropertySnapshot> {
        let snapshot = Arc::new(snapshot);
        self.snapshot = Some(Arc::clone(&snapshot));
        self.available = true;
        snapshot
    }

    /// Marks the device unavailable, keeping the last good snapshot.
    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }

    /// Applies an encoder's clean point update.
    pub fn apply_point_update(&mut self, update: PointUpdate) {
        update.apply(&mut self.last_clean_point);
    }
}
