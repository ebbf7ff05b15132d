// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transports that carry raw commands to the device.
//!
//! The translation layer only needs one primitive: send a method with
//! positional parameters and get back a positional result. Anything that can
//! do that implements [`DeviceTransport`].
//!
//! # Transports
//!
//! - [`HttpTransport`]: JSON-RPC over HTTP to a gateway that owns the
//!   encrypted exchange with the appliance (feature `http`)

#[cfg(feature = "http")]
mod http;
#[cfg(test)]
pub(crate) mod testing;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};

use serde_json::Value;

use crate::command::Command;
use crate::error::ProtocolError;

/// Trait for transports that can send raw commands to a vacuum.
///
/// Implementations own timeouts and retries; callers see one attempt.
#[allow(async_fn_in_trait)]
pub trait DeviceTransport {
    /// Sends a raw command and returns the positional result.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached or rejects
    /// the command.
    async fn raw_command(&self, method: &str, params: &[Value])
    -> Result<Vec<Value>, ProtocolError>;

    /// Sends a typed command.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached or rejects
    /// the command.
    async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> Result<Vec<Value>, ProtocolError> {
        self.raw_command(command.method(), &command.params()).await
    }
}
