// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level vacuum facade.
//!
//! [`Vacuum`] ties a transport, a protocol version and the cached
//! [`OperationContext`] together. It polls the device, encodes operations
//! with the version's encoder and runs the resulting command sequences.
//!
//! # Failure reporting
//!
//! The boolean methods (`start`, `clean_zone`, ...) never return an error:
//! faults are logged with an operation specific message and reported as
//! `false`. Use [`Vacuum::try_execute`] to get the error value instead.
//!
//! # Ordering
//!
//! Commands to one vacuum are serialized: a multi-step sequence holds the
//! device's command gate until it completes or aborts, so steps of two
//! operations never interleave.
//!
//! ```no_run
//! use mirobo_lib::{Vacuum, VacuumConfig};
//!
//! # async fn example() -> mirobo_lib::Result<()> {
//! let config = VacuumConfig::new("192.168.1.60", "0123456789abcdef0123456789abcdef");
//! let vacuum = Vacuum::from_config(config).build().await?;
//!
//! if vacuum.start().await {
//!     println!("state: {:?}", vacuum.state());
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod builder;

#[cfg(feature = "http")]
pub use builder::VacuumBuilder;

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::capabilities::Capabilities;
use crate::command::{GetPropCommand, RawCommand, SequenceOutcome};
use crate::config::DEFAULT_NAME;
use crate::encoder::{EncodeContext, Operation, ProtocolVersion};
use crate::error::{Error, FaultKind};
use crate::protocol::DeviceTransport;
use crate::state::{OperationContext, PropertySnapshot, StateAttributes, StateDecoder};
use crate::types::{FanSpeed, FanSpeedLevel, Point, Repeats, RunState, Zone};

/// A vacuum reachable through a [`DeviceTransport`].
///
/// # Examples
///
/// ```no_run
/// use mirobo_lib::Vacuum;
/// use mirobo_lib::encoder::ProtocolVersion;
/// use mirobo_lib::protocol::HttpTransport;
///
/// # async fn example() -> mirobo_lib::Result<()> {
/// let transport = HttpTransport::new("192.168.1.60")?;
/// let vacuum = Vacuum::new("192.168.1.60", transport, ProtocolVersion::Legacy)
///     .with_name("Hallway");
///
/// vacuum.refresh().await;
/// println!("battery: {:?}", vacuum.battery_level());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Vacuum<T: DeviceTransport> {
    name: String,
    host: String,
    version: ProtocolVersion,
    decoder: StateDecoder,
    transport: Arc<T>,
    context: Arc<RwLock<OperationContext>>,
    gate: Mutex<()>,
}

impl<T: DeviceTransport> Vacuum<T> {
    /// Creates a vacuum with the default name and no cached state.
    #[must_use]
    pub fn new(host: impl Into<String>, transport: T, version: ProtocolVersion) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            host: host.into(),
            version,
            decoder: StateDecoder::new(version),
            transport: Arc::new(transport),
            context: Arc::new(RwLock::new(OperationContext::new())),
            gate: Mutex::new(()),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // ========== Accessors ==========

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the host this vacuum is registered under.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the firmware generation.
    #[must_use]
    pub fn protocol_version(&self) -> ProtocolVersion {
        self.version
    }

    /// Returns the supported features.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_version(self.version)
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns `true` if the last poll succeeded.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.context.read().is_available()
    }

    /// Returns the last good snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<PropertySnapshot>> {
        self.context.read().snapshot()
    }

    /// Returns the decoded run state, or `None` before the first poll.
    #[must_use]
    pub fn state(&self) -> Option<RunState> {
        self.snapshot()
            .map(|snapshot| self.decoder.decode(&snapshot))
    }

    /// Returns the battery percentage, or `None` before the first poll.
    #[must_use]
    pub fn battery_level(&self) -> Option<i64> {
        self.decoder.battery_level(self.snapshot().as_deref())
    }

    /// Returns the fan speed, or `None` before the first poll.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanSpeedLevel> {
        self.decoder.fan_speed(self.snapshot().as_deref())
    }

    /// Returns the named fan speeds in ascending device order.
    #[must_use]
    pub fn fan_speed_list(&self) -> Vec<&'static str> {
        FanSpeed::levels()
    }

    /// Returns the attribute view of the last good snapshot.
    #[must_use]
    pub fn attributes(&self) -> StateAttributes {
        self.decoder.attributes(self.snapshot().as_deref())
    }

    /// Returns the cached target of the last point cleaning request.
    #[must_use]
    pub fn last_clean_point(&self) -> Option<Point> {
        self.context.read().last_clean_point()
    }

    // ========== Polling ==========

    /// Polls every property and replaces the cached snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the query fails, or `Error::Parse` if the
    /// response does not match the property list. The cached snapshot and
    /// availability are left untouched in both cases.
    pub async fn try_refresh(&self) -> Result<Arc<PropertySnapshot>, Error> {
        let values = {
            let _gate = self.gate.lock().await;
            self.transport.send_command(&GetPropCommand::all()).await?
        };
        let snapshot = PropertySnapshot::from_values(&values)?;

        tracing::debug!(
            host = %self.host,
            run_state = snapshot.run_state(),
            mode = snapshot.mode(),
            "Polled vacuum properties"
        );

        Ok(self.context.write().replace_snapshot(snapshot))
    }

    /// Polls the device, returning whether it is available.
    ///
    /// On failure the last good snapshot is kept and the device is marked
    /// unavailable. Connectivity faults are logged as errors, protocol faults
    /// as warnings.
    pub async fn refresh(&self) -> bool {
        match self.try_refresh().await {
            Ok(_) => true,
            Err(error) => {
                match error.fault_kind() {
                    Some(FaultKind::Connectivity) => tracing::error!(
                        host = %self.host,
                        fault = %FaultKind::Connectivity,
                        "Unable to reach the vacuum while fetching the state: {error}"
                    ),
                    _ => tracing::warn!(
                        host = %self.host,
                        fault = %FaultKind::Protocol,
                        "Vacuum rejected the state query: {error}"
                    ),
                }
                self.context.write().mark_unavailable();
                false
            }
        }
    }

    // ========== Execution ==========

    /// Encodes and runs an operation.
    ///
    /// The clean point update requested by the encoder is applied before the
    /// commands are sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` when the operation cannot be encoded (no
    /// snapshot yet, or unsupported by this firmware), or `Error::Protocol`
    /// with the fault of the step that aborted the sequence.
    pub async fn try_execute(&self, operation: &Operation) -> Result<(), Error> {
        let _gate = self.gate.lock().await;

        let (snapshot, last_clean_point) = {
            let context = self.context.read();
            (context.snapshot(), context.last_clean_point())
        };
        let encoded = self.version.encoder().encode(
            operation,
            &EncodeContext::new(snapshot.as_deref(), last_clean_point),
        )?;

        self.context.write().apply_point_update(encoded.point_update);

        match encoded.sequence.run(self.transport.as_ref()).await {
            SequenceOutcome::Completed => Ok(()),
            SequenceOutcome::Aborted { error, .. } => Err(error.into()),
        }
    }

    /// Encodes and runs an operation, reporting success as a boolean.
    pub async fn execute(&self, operation: &Operation) -> bool {
        match self.try_execute(operation).await {
            Ok(()) => true,
            // Already logged by the sequence with its failure message.
            Err(Error::Protocol(_)) => false,
            Err(error) => {
                tracing::error!(
                    host = %self.host,
                    operation = operation.name(),
                    "{}: {error}",
                    operation.failure_message()
                );
                false
            }
        }
    }

    /// Starts or resumes cleaning.
    pub async fn start(&self) -> bool {
        self.execute(&Operation::Start).await
    }

    /// Pauses cleaning.
    pub async fn pause(&self) -> bool {
        self.execute(&Operation::Pause).await
    }

    /// Stops cleaning.
    pub async fn stop(&self) -> bool {
        self.execute(&Operation::Stop).await
    }

    /// Sends the vacuum back to its dock.
    pub async fn return_to_base(&self) -> bool {
        self.execute(&Operation::ReturnToBase).await
    }

    /// Makes the vacuum beep.
    pub async fn locate(&self) -> bool {
        self.execute(&Operation::Locate).await
    }

    /// Sets the suction level from a level name or an integer.
    ///
    /// Unrecognized input is logged with the valid names and nothing is sent.
    pub async fn set_fan_speed(&self, speed: &str) -> bool {
        match FanSpeed::encode(speed) {
            Ok(level) => self.execute(&Operation::SetFanSpeed(level)).await,
            Err(error) => {
                tracing::error!(host = %self.host, input = speed, "{error}");
                false
            }
        }
    }

    /// Sends a raw command as is.
    pub async fn send_command(&self, method: &str, params: Vec<Value>) -> bool {
        self.execute(&Operation::SendCommand(RawCommand::new(method, params)))
            .await
    }

    /// Cleans each zone `repeats` times.
    pub async fn clean_zone(&self, zones: &[Zone], repeats: Repeats) -> bool {
        self.execute(&Operation::CleanZone {
            zones: zones.to_vec(),
            repeats,
        })
        .await
    }

    /// Cleans around a point and remembers it for later start/pause/stop.
    pub async fn clean_point(&self, point: Point) -> bool {
        self.execute(&Operation::CleanPoint(point)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::error::{DeviceError, ProtocolError};
    use crate::protocol::testing::ScriptedTransport;
    use serde_json::json;

    // run_state=3, mode=0, battery=80, suction=2, is_mop=2
    const ROOM_MOP: [i64; 14] = [3, 0, 0, 80, 1, 0, 10, 4, 2, 1, 1, 1, 2, 0];
    // run_state=3, mode=4, battery=80, suction=1, is_mop=0
    const POINT_MODE: [i64; 14] = [3, 4, 0, 80, 1, 0, 10, 4, 1, 1, 1, 1, 0, 0];

    fn vacuum(props: &[i64], version: ProtocolVersion) -> Vacuum<ScriptedTransport> {
        Vacuum::new("10.0.0.2", ScriptedTransport::with_props(props), version)
    }

    fn last_call(vacuum: &Vacuum<ScriptedTransport>) -> RawCommand {
        vacuum.transport().calls().pop().unwrap()
    }

    #[tokio::test]
    async fn accessors_before_first_poll() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware).with_name("Upstairs");
        assert_eq!(vac.name(), "Upstairs");
        assert_eq!(vac.host(), "10.0.0.2");
        assert!(!vac.is_available());
        assert_eq!(vac.state(), None);
        assert_eq!(vac.battery_level(), None);
        assert_eq!(vac.fan_speed(), None);
        assert_eq!(vac.attributes(), StateAttributes::Map(serde_json::Map::new()));
        assert_eq!(
            vac.fan_speed_list(),
            vec!["Silent", "Standard", "Medium", "Turbo"]
        );
        assert!(vac.capabilities().clean_zone);
    }

    #[tokio::test]
    async fn default_name() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::Legacy);
        assert_eq!(vac.name(), "Xiaomi Vacuum cleaner STYJ02YM");
        assert!(!vac.capabilities().clean_point);
    }

    #[tokio::test]
    async fn refresh_queries_all_props_positionally() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        assert!(vac.refresh().await);

        let call = last_call(&vac);
        assert_eq!(call.method(), "get_prop");
        assert_eq!(call.params().len(), 14);
        assert_eq!(call.params()[3], json!("battary_life"));

        assert!(vac.is_available());
        assert_eq!(vac.state(), Some(RunState::Cleaning));
        assert_eq!(vac.battery_level(), Some(80));
        assert_eq!(vac.fan_speed(), Some(FanSpeedLevel::Named(FanSpeed::Medium)));
        let attributes = vac.attributes();
        let map = attributes.as_map().unwrap();
        assert_eq!(map["status"], json!("cleaning"));
    }

    #[tokio::test]
    async fn failed_poll_keeps_last_snapshot() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        assert!(vac.refresh().await);

        vac.transport().fail_method("get_prop", FaultKind::Connectivity);
        assert!(!vac.refresh().await);
        assert!(!vac.is_available());
        assert_eq!(vac.snapshot().unwrap().run_state(), 3);

        vac.transport().fail_method("get_prop", FaultKind::Protocol);
        assert!(!vac.refresh().await);
        assert_eq!(vac.battery_level(), Some(80));

        vac.transport().clear_failures();
        assert!(vac.refresh().await);
        assert!(vac.is_available());
    }

    #[tokio::test]
    async fn fractional_area_does_not_fail_the_poll() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        let mut props: Vec<Value> = ROOM_MOP.iter().map(|v| json!(v)).collect();
        props[7] = json!(12.5);
        vac.transport().respond("get_prop", props);

        assert!(vac.refresh().await);
        assert!(vac.is_available());
        assert_eq!(vac.state(), Some(RunState::Cleaning));
        let attributes = vac.attributes();
        assert_eq!(attributes.as_map().unwrap()["s_area"], json!(12.5));
        assert!(vac.start().await);
    }

    #[tokio::test]
    async fn short_poll_response_is_a_protocol_fault() {
        let vac = vacuum(&[1, 2, 3], ProtocolVersion::ModeAware);
        let err = vac.try_refresh().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(err.fault_kind(), Some(FaultKind::Protocol));
        assert!(!vac.refresh().await);
        assert!(vac.snapshot().is_none());
    }

    #[tokio::test]
    async fn mode_aware_start_needs_a_snapshot() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        let err = vac.try_execute(&Operation::Start).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::NoSnapshot { operation: "start" })
        ));
        assert!(!vac.start().await);
        assert!(vac.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn legacy_start_works_without_snapshot() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::Legacy);
        assert!(vac.start().await);
        assert_eq!(
            last_call(&vac),
            RawCommand::new("set_mode_withroom", vec![json!(0), json!(1), json!(0)])
        );
    }

    #[tokio::test]
    async fn room_start_uses_mop_action_mode() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        vac.refresh().await;
        assert!(vac.start().await);
        assert_eq!(
            last_call(&vac),
            RawCommand::new("set_mode_withroom", vec![json!(3), json!(1), json!(0)])
        );
    }

    #[tokio::test]
    async fn point_lifecycle() {
        let vac = vacuum(&POINT_MODE, ProtocolVersion::ModeAware);
        vac.refresh().await;

        assert!(vac.clean_point(Point::new(150, 200)).await);
        assert_eq!(vac.last_clean_point(), Some(Point::new(150, 200)));

        vac.transport().clear_calls();
        assert!(vac.start().await);
        assert!(vac.pause().await);
        assert!(vac.stop().await);
        assert_eq!(
            vac.transport().calls(),
            vec![
                RawCommand::new("set_pointclean", vec![json!(1), json!(150), json!(200)]),
                RawCommand::new("set_pointclean", vec![json!(3), json!(150), json!(200)]),
                RawCommand::new("set_pointclean", vec![json!(0), json!(0), json!(0)]),
            ]
        );
        assert_eq!(vac.last_clean_point(), None);

        // Mode is still 4 but the point is gone.
        assert!(vac.start().await);
        assert_eq!(last_call(&vac).method(), "set_mode_withroom");
    }

    #[tokio::test]
    async fn failed_upload_map_skips_point_clean_but_caches_point() {
        let vac = vacuum(&POINT_MODE, ProtocolVersion::ModeAware);
        vac.transport().fail_method("set_uploadmap", FaultKind::Protocol);

        assert!(!vac.clean_point(Point::new(150, 200)).await);
        assert_eq!(vac.transport().methods(), vec!["set_uploadmap"]);
        assert_eq!(vac.last_clean_point(), Some(Point::new(150, 200)));
    }

    #[tokio::test]
    async fn failed_upload_map_skips_zone() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        vac.transport()
            .fail_method("set_uploadmap", FaultKind::Connectivity);

        let err = vac
            .try_execute(&Operation::CleanZone {
                zones: vec![Zone::new(0, 0, 100, 100)],
                repeats: Repeats::clamped(2),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::ConnectionFailed(_))
        ));
        assert_eq!(vac.transport().methods(), vec!["set_uploadmap"]);
    }

    #[tokio::test]
    async fn clean_zone_sends_three_steps() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        assert!(
            vac.clean_zone(&[Zone::from_tuple((0, 100, 100, 0))], Repeats::clamped(7))
                .await
        );
        let calls = vac.transport().calls();
        assert_eq!(
            vac.transport().methods(),
            vec!["set_uploadmap", "set_zone", "set_mode"]
        );
        assert_eq!(calls[1].params()[0], json!(3));
        assert_eq!(calls[1].params()[3], json!("2_0_0_0_0_100_100_100_100_0"));
    }

    #[tokio::test]
    async fn legacy_rejects_targeted_cleaning() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::Legacy);
        assert!(!vac.clean_point(Point::new(1, 1)).await);
        assert!(
            !vac.clean_zone(&[Zone::new(0, 0, 1, 1)], Repeats::ONCE)
                .await
        );
        assert!(vac.transport().calls().is_empty());
        assert_eq!(vac.last_clean_point(), None);
    }

    #[tokio::test]
    async fn fan_speed_by_name_number_and_garbage() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);

        assert!(vac.set_fan_speed("turbo").await);
        assert_eq!(last_call(&vac), RawCommand::new("set_suction", vec![json!(3)]));

        assert!(vac.set_fan_speed("105").await);
        assert_eq!(last_call(&vac), RawCommand::new("set_suction", vec![json!(105)]));

        vac.transport().clear_calls();
        assert!(!vac.set_fan_speed("loud").await);
        assert!(vac.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn shared_operations() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::ModeAware);
        assert!(vac.return_to_base().await);
        assert!(vac.locate().await);
        assert!(vac.send_command("get_consumable", vec![json!("all")]).await);
        assert_eq!(
            vac.transport().methods(),
            vec!["set_charge", "set_resetpos", "get_consumable"]
        );
    }

    #[tokio::test]
    async fn command_failure_reports_false() {
        let vac = vacuum(&ROOM_MOP, ProtocolVersion::Legacy);
        vac.transport().fail_method("set_charge", FaultKind::Connectivity);
        assert!(!vac.return_to_base().await);
        vac.transport().fail_method("set_mode", FaultKind::Protocol);
        assert!(!vac.stop().await);
    }
}
