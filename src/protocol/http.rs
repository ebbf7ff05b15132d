// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP JSON-RPC transport.
//!
//! Raw commands are posted to `<base_url>/rpc` as miIO style envelopes:
//!
//! ```text
//! -> {"id": 7, "method": "set_mode", "params": [0]}
//! <- {"id": 7, "result": ["ok"]}
//! <- {"id": 7, "error": {"code": -5001, "message": "invalid arg"}}
//! ```
//!
//! The gateway on the other end handles the encrypted UDP exchange with the
//! appliance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::DeviceTransport;

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for an HTTP gateway transport.
///
/// # Examples
///
/// ```
/// use mirobo_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(8080)
///     .with_token("0123456789abcdef0123456789abcdef")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.60:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    token: Option<String>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified host.
    ///
    /// A host that already carries a scheme (`http://` or `https://`) and
    /// port is used as is.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the device token forwarded to the gateway.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether a token is set.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }
        if self.port == Self::DEFAULT_PORT {
            format!("http://{}", self.host)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpTransport {
            base_url,
            client,
            token: self.token,
            timeout: self.timeout,
            next_id: AtomicU64::new(1),
        })
    }
}

// ============================================================================
// HttpTransport
// ============================================================================

/// HTTP transport speaking JSON-RPC to a miIO gateway.
///
/// Request ids increase monotonically per transport.
#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
    token: Option<String>,
    timeout: Duration,
    next_id: AtomicU64,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    id: u64,
    method: &'a str,
    params: &'a [Value],
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    #[serde(default)]
    message: String,
}

impl HttpTransport {
    /// Creates a transport for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_transport()
    }

    /// Returns the base URL of the gateway.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rpc_url(&self) -> String {
        format!("{}/rpc", self.base_url)
    }

    fn map_send_error(&self, error: reqwest::Error) -> ProtocolError {
        if error.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ProtocolError::Timeout(millis)
        } else {
            ProtocolError::Http(error)
        }
    }
}

/// Turns a decoded envelope into the positional result.
fn into_result(response: RpcResponse) -> Result<Vec<Value>, ProtocolError> {
    if let Some(error) = response.error {
        return Err(ProtocolError::DeviceRejected {
            code: error.code,
            message: error.message,
        });
    }
    match response.result {
        Some(Value::Array(values)) => Ok(values),
        Some(value) => Ok(vec![value]),
        None => Err(ProtocolError::MalformedResponse(
            "response has neither result nor error".to_string(),
        )),
    }
}

impl DeviceTransport for HttpTransport {
    async fn raw_command(
        &self,
        method: &str,
        params: &[Value],
    ) -> Result<Vec<Value>, ProtocolError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest { id, method, params };

        tracing::debug!(url = %self.rpc_url(), id, method, "Sending JSON-RPC command");

        let mut builder = self.client.post(self.rpc_url()).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        tracing::debug!(id, body = %body, "Received JSON-RPC response");

        let envelope: RpcResponse = serde_json::from_str(&body)
            .map_err(|e| ProtocolError::MalformedResponse(e.to_string()))?;

        into_result(envelope)
    }
}
