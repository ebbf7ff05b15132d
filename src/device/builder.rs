// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP vacuum builder.

use crate::config::VacuumConfig;
use crate::device::Vacuum;
use crate::encoder::ProtocolVersion;
use crate::error::Error;
use crate::protocol::HttpTransport;

/// Builder for vacuums reached through the HTTP gateway.
///
/// # Examples
///
/// ```no_run
/// use mirobo_lib::{Vacuum, VacuumConfig};
/// use mirobo_lib::encoder::ProtocolVersion;
///
/// # async fn example() -> mirobo_lib::Result<()> {
/// let config = VacuumConfig::new("192.168.1.60", "0123456789abcdef0123456789abcdef");
///
/// // Polls once before returning
/// let vacuum = Vacuum::from_config(config.clone()).build().await?;
///
/// // No network access
/// let legacy = Vacuum::from_config(config)
///     .with_protocol(ProtocolVersion::Legacy)
///     .build_without_probe()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VacuumBuilder {
    config: VacuumConfig,
}

impl VacuumBuilder {
    pub(crate) fn new(config: VacuumConfig) -> Self {
        Self { config }
    }

    /// Overrides the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Overrides the firmware generation.
    #[must_use]
    pub fn with_protocol(mut self, protocol: ProtocolVersion) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Returns the configuration being built.
    #[must_use]
    pub fn config(&self) -> &VacuumConfig {
        &self.config
    }

    /// Builds the vacuum and polls it once.
    ///
    /// A failed first poll is logged and leaves the vacuum unavailable; it
    /// does not fail the build.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub async fn build(self) -> Result<Vacuum<HttpTransport>, Error> {
        let vacuum = self.build_without_probe()?;
        vacuum.refresh().await;
        Ok(vacuum)
    }

    /// Builds the vacuum without polling it.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn build_without_probe(self) -> Result<Vacuum<HttpTransport>, Error> {
        self.config.validate()?;

        tracing::info!(
            host = %self.config.host,
            protocol = %self.config.protocol,
            "Initializing with host {} (token {}...)",
            self.config.host,
            self.config.token_prefix()
        );

        let transport = self.config.http_config().into_transport()?;
        Ok(
            Vacuum::new(self.config.host.trim(), transport, self.config.protocol)
                .with_name(self.config.name),
        )
    }
}

impl Vacuum<HttpTransport> {
    /// Creates a builder from a configuration.
    #[must_use]
    pub fn from_config(config: VacuumConfig) -> VacuumBuilder {
        VacuumBuilder::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn build_without_probe_applies_config() {
        let vacuum = Vacuum::from_config(VacuumConfig::new("192.168.1.60", TOKEN))
            .with_name("Hallway")
            .with_protocol(ProtocolVersion::Legacy)
            .build_without_probe()
            .unwrap();

        assert_eq!(vacuum.name(), "Hallway");
        assert_eq!(vacuum.host(), "192.168.1.60");
        assert_eq!(vacuum.protocol_version(), ProtocolVersion::Legacy);
        assert_eq!(vacuum.transport().base_url(), "http://192.168.1.60");
        assert!(!vacuum.is_available());
    }

    #[test]
    fn invalid_token_fails_before_transport() {
        let err = Vacuum::from_config(VacuumConfig::new("192.168.1.60", "short"))
            .build_without_probe()
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::InvalidToken(5))));
    }

    #[test]
    fn builder_exposes_config() {
        let builder = Vacuum::from_config(VacuumConfig::new("h", TOKEN));
        assert_eq!(builder.config().protocol, ProtocolVersion::ModeAware);
    }
}
