// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state: property snapshots, state decoding and cached context.
//!
//! A poll yields a [`PropertySnapshot`]; the [`StateDecoder`] for the
//! device's protocol version turns it into a [`RunState`](crate::types::RunState)
//! and an attribute view. [`OperationContext`] holds what a device keeps
//! between calls.
//!
//! # Examples
//!
//! ```
//! use mirobo_lib::encoder::ProtocolVersion;
//! use mirobo_lib::state::{OperationContext, PropertySnapshot, StateDecoder};
//! use mirobo_lib::types::RunState;
//!
//! let mut context = OperationContext::new();
//! context.replace_snapshot(PropertySnapshot::new([5, 0, 0, 100, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0]));
//!
//! let decoder = StateDecoder::new(ProtocolVersion::Legacy);
//! let snapshot = context.snapshot().unwrap();
//! assert_eq!(decoder.decode(&snapshot), RunState::Docked);
//! ```

mod context;
mod decoder;
mod snapshot;

pub use context::OperationContext;
pub use decoder::{StateAttributes, StateDecoder};
pub use snapshot::{ALL_PROPS, Prop, PropertySnapshot};
