// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of vacuums keyed by host, and the zone/point services.
//!
//! The registry is owned by whoever composes the application; there is no
//! global instance. Vacuums are inserted on setup and targeted by host when
//! a [`ServiceCall`] is dispatched.
//!
//! # Examples
//!
//! ```no_run
//! use mirobo_lib::manager::{ServiceCall, VacuumRegistry};
//! use mirobo_lib::types::Zone;
//! use mirobo_lib::{Vacuum, VacuumConfig};
//!
//! # async fn example() -> mirobo_lib::Result<()> {
//! let registry = VacuumRegistry::new();
//! let config = VacuumConfig::new("192.168.1.60", "0123456789abcdef0123456789abcdef");
//! registry.insert(Vacuum::from_config(config).build().await?).await;
//!
//! let call = ServiceCall::clean_zone(vec![Zone::from_tuple((25500, 25500, 26500, 26500))], 2);
//! for (host, ok) in registry.dispatch(&call, &[]).await {
//!     println!("{host}: {ok}");
//! }
//! # Ok(())
//! # }
//! ```

mod registry;
mod service;

pub use registry::VacuumRegistry;
pub use service::ServiceCall;
