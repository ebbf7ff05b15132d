// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vacuum configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::encoder::ProtocolVersion;
use crate::error::ValueError;
#[cfg(feature = "http")]
use crate::protocol::HttpConfig;

/// Name used when the configuration does not give one.
pub const DEFAULT_NAME: &str = "Xiaomi Vacuum cleaner STYJ02YM";

/// Length of a device token in hexadecimal characters.
pub const TOKEN_LENGTH: usize = 32;

/// Characters of the token that may appear in logs.
const TOKEN_LOG_PREFIX: usize = 5;

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Configuration for one vacuum.
///
/// # Examples
///
/// ```
/// use mirobo_lib::VacuumConfig;
/// use mirobo_lib::encoder::ProtocolVersion;
///
/// let config: VacuumConfig = serde_json::from_str(
///     r#"{"host": "192.168.1.60", "token": "0123456789abcdef0123456789abcdef"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.name, "Xiaomi Vacuum cleaner STYJ02YM");
/// assert_eq!(config.protocol, ProtocolVersion::ModeAware);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacuumConfig {
    /// Address of the vacuum (or its gateway).
    pub host: String,
    /// Device token, 32 hexadecimal characters.
    pub token: String,
    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Firmware generation.
    #[serde(default)]
    pub protocol: ProtocolVersion,
    /// Gateway port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl VacuumConfig {
    /// Creates a configuration with the default name and protocol.
    #[must_use]
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            name: default_name(),
            protocol: ProtocolVersion::default(),
            port: None,
            timeout_ms: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the firmware generation.
    #[must_use]
    pub fn with_protocol(mut self, protocol: ProtocolVersion) -> Self {
        self.protocol = protocol;
        self
    }

    /// Sets the gateway port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the request timeout, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Checks the host and token.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyHost` for a blank host and
    /// `ValueError::InvalidToken` unless the token is exactly 32
    /// hexadecimal characters.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.host.trim().is_empty() {
            return Err(ValueError::EmptyHost);
        }
        let token = self.token.trim();
        if token.len() != TOKEN_LENGTH || !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidToken(token.chars().count()));
        }
        Ok(())
    }

    /// Returns the part of the token that may be logged.
    #[must_use]
    pub fn token_prefix(&self) -> &str {
        let token = self.token.trim();
        let end = token
            .char_indices()
            .nth(TOKEN_LOG_PREFIX)
            .map_or(token.len(), |(index, _)| index);
        &token[..end]
    }

    /// Builds the HTTP transport configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        let mut config = HttpConfig::new(self.host.trim()).with_token(self.token.trim());
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(timeout) = self.timeout() {
            config = config.with_timeout(timeout);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = "0123456789abcdef0123456789ABCDEF";

    #[test]
    fn defaults_when_deserializing() {
        let config: VacuumConfig =
            serde_json::from_value(json!({"host": "10.0.0.2", "token": TOKEN})).unwrap();
        assert_eq!(config, VacuumConfig::new("10.0.0.2", TOKEN));
        assert_eq!(config.port, None);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn explicit_fields() {
        let config: VacuumConfig = serde_json::from_value(json!({
            "host": "10.0.0.2",
            "token": TOKEN,
            "name": "Upstairs",
            "protocol": "legacy",
            "port": 8080,
            "timeout_ms": 2500
        }))
        .unwrap();
        assert_eq!(config.name, "Upstairs");
        assert_eq!(config.protocol, ProtocolVersion::Legacy);
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn unknown_protocol_rejected() {
        let result: Result<VacuumConfig, _> =
            serde_json::from_value(json!({"host": "h", "token": TOKEN, "protocol": "v9"}));
        assert!(result.is_err());
    }

    #[test]
    fn validate_host_and_token() {
        assert!(VacuumConfig::new("10.0.0.2", TOKEN).validate().is_ok());
        assert_eq!(
            VacuumConfig::new("  ", TOKEN).validate(),
            Err(ValueError::EmptyHost)
        );
        assert_eq!(
            VacuumConfig::new("10.0.0.2", "abc").validate(),
            Err(ValueError::InvalidToken(3))
        );
        assert_eq!(
            VacuumConfig::new("10.0.0.2", "g123456789abcdef0123456789abcdef").validate(),
            Err(ValueError::InvalidToken(32))
        );
    }

    #[test]
    fn token_prefix_is_five_characters() {
        assert_eq!(VacuumConfig::new("h", TOKEN).token_prefix(), "01234");
        assert_eq!(VacuumConfig::new("h", "ab").token_prefix(), "ab");
    }

    #[test]
    fn builder_methods() {
        let config = VacuumConfig::new("h", TOKEN)
            .with_name("Kitchen")
            .with_protocol(ProtocolVersion::Legacy)
            .with_port(9000)
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.name, "Kitchen");
        assert_eq!(config.protocol, ProtocolVersion::Legacy);
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.timeout_ms, Some(3000));
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_config_carries_settings() {
        let http = VacuumConfig::new("10.0.0.2", TOKEN)
            .with_port(8080)
            .with_timeout(Duration::from_secs(2))
            .http_config();
        assert_eq!(http.base_url(), "http://10.0.0.2:8080");
        assert!(http.has_token());
        assert_eq!(http.timeout(), Duration::from_secs(2));
    }
}
