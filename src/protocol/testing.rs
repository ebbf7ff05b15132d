// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport for unit tests.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::command::RawCommand;
use crate::error::{FaultKind, ProtocolError};
use crate::protocol::DeviceTransport;

/// Records every call and answers from a script.
///
/// Unscripted methods answer `["ok"]`.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    calls: Mutex<Vec<RawCommand>>,
    failures: Mutex<HashMap<String, FaultKind>>,
    responses: Mutex<HashMap<String, Vec<Value>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answers `get_prop` with the given values.
    pub(crate) fn with_props(props: &[i64]) -> Self {
        let transport = Self::new();
        transport.respond("get_prop", props.iter().map(|v| json!(v)).collect());
        transport
    }

    pub(crate) fn respond(&self, method: &str, values: Vec<Value>) {
        self.responses.lock().insert(method.to_string(), values);
    }

    pub(crate) fn fail_method(&self, method: &str, kind: FaultKind) {
        self.failures.lock().insert(method.to_string(), kind);
    }

    pub(crate) fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    pub(crate) fn calls(&self) -> Vec<RawCommand> {
        self.calls.lock().clone()
    }

    pub(crate) fn methods(&self) -> Vec<String> {
        use crate::command::Command;
        self.calls
            .lock()
            .iter()
            .map(|call| call.method().to_string())
            .collect()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl DeviceTransport for ScriptedTransport {
    async fn raw_command(
        &self,
        method: &str,
        params: &[Value],
    ) -> Result<Vec<Value>, ProtocolError> {
        self.calls
            .lock()
            .push(RawCommand::new(method, params.to_vec()));

        if let Some(kind) = self.failures.lock().get(method) {
            return Err(match kind {
                FaultKind::Connectivity => ProtocolError::ConnectionFailed(format!(
                    "no route to device while sending {method}"
                )),
                FaultKind::Protocol => ProtocolError::DeviceRejected {
                    code: -5001,
                    message: format!("{method} rejected"),
                },
            });
        }

        Ok(self
            .responses
            .lock()
            .get(method)
            .cloned()
            .unwrap_or_else(|| vec![json!("ok")]))
    }
}
