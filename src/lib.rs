// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `mirobo_lib` - A Rust library to control STYJ02YM class vacuums.
//!
//! The device speaks a positional, integer coded protocol. This library
//! translates high-level intents (start, pause, clean a zone, ...) into the
//! exact raw commands the firmware expects, and decodes the flat property
//! array it reports back into semantic state.
//!
//! # Supported Features
//!
//! - **Control**: start, pause, stop, return to dock, locate, fan speed
//! - **Targeted cleaning**: rectangular zones and single points (mode-aware
//!   firmware only)
//! - **State**: run state, battery, fan speed and a raw attribute view
//! - **Raw commands**: pass-through for anything not covered above
//!
//! # Firmware Generations
//!
//! Two incompatible generations exist. [`encoder::ProtocolVersion`] selects
//! one per device; it picks both the command encoder and the state table.
//!
//! # Quick Start
//!
//! ```no_run
//! use mirobo_lib::{Vacuum, VacuumConfig};
//! use mirobo_lib::types::{Point, Repeats, Zone};
//!
//! #[tokio::main]
//! async fn main() -> mirobo_lib::Result<()> {
//!     let config = VacuumConfig::new("192.168.1.60", "0123456789abcdef0123456789abcdef");
//!     let vacuum = Vacuum::from_config(config).build().await?;
//!
//!     vacuum.set_fan_speed("Medium").await;
//!     vacuum.clean_zone(&[Zone::new(25500, 25500, 26500, 26500)], Repeats::clamped(2)).await;
//!     vacuum.clean_point(Point::new(25500, 25500)).await;
//!
//!     vacuum.refresh().await;
//!     println!("{:?} at {:?}%", vacuum.state(), vacuum.battery_level());
//!     Ok(())
//! }
//! ```
//!
//! # Custom Transports
//!
//! Anything implementing [`protocol::DeviceTransport`] can carry the raw
//! commands; [`Vacuum::new`] accepts any of them.

mod capabilities;
pub mod command;
mod config;
mod device;
pub mod encoder;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod state;
pub mod types;

pub use capabilities::Capabilities;
pub use command::{Command, RawCommand};
pub use config::{DEFAULT_NAME, TOKEN_LENGTH, VacuumConfig};
pub use device::Vacuum;
#[cfg(feature = "http")]
pub use device::VacuumBuilder;
pub use encoder::{Operation, ProtocolVersion};
pub use error::{DeviceError, Error, FaultKind, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use types::{FanSpeed, FanSpeedLevel, Point, Repeats, RunState, Zone};
