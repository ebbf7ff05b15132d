// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-keyed vacuum registry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::device::Vacuum;
use crate::manager::ServiceCall;
use crate::protocol::DeviceTransport;

/// Vacuums keyed by host.
#[derive(Debug)]
pub struct VacuumRegistry<T: DeviceTransport> {
    devices: Arc<RwLock<HashMap<String, Arc<Vacuum<T>>>>>,
}

impl<T: DeviceTransport> Default for VacuumRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeviceTransport> VacuumRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            devices: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a vacuum under its host and returns the shared handle.
    ///
    /// A vacuum already registered under the same host is replaced.
    pub async fn insert(&self, vacuum: Vacuum<T>) -> Arc<Vacuum<T>> {
        let host = vacuum.host().to_string();
        let vacuum = Arc::new(vacuum);
        let previous = self
            .devices
            .write()
            .await
            .insert(host.clone(), Arc::clone(&vacuum));
        if previous.is_some() {
            tracing::warn!(%host, "Replacing vacuum already registered for host");
        } else {
            tracing::debug!(%host, name = vacuum.name(), "Registered vacuum");
        }
        vacuum
    }

    /// Returns the vacuum registered under `host`.
    pub async fn get(&self, host: &str) -> Option<Arc<Vacuum<T>>> {
        self.devices.read().await.get(host).cloned()
    }

    /// Unregisters and returns the vacuum under `host`.
    pub async fn remove(&self, host: &str) -> Option<Arc<Vacuum<T>>> {
        self.devices.write().await.remove(host)
    }

    /// Returns the registered hosts, sorted.
    pub async fn hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self.devices.read().await.keys().cloned().collect();
        hosts.sort();
        hosts
    }

    /// Returns the number of registered vacuums.
    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Returns `true` if nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    /// Runs a service call on the targeted vacuums, then refreshes them.
    ///
    /// An empty `targets` slice addresses every registered vacuum. Unknown
    /// hosts are logged and skipped. Calls run one vacuum at a time, in
    /// target order (host order when addressing all). Returns the outcome
    /// of the call per host.
    pub async fn dispatch(&self, call: &ServiceCall, targets: &[&str]) -> Vec<(String, bool)> {
        let vacuums = self.resolve(targets).await;

        let mut outcomes = Vec::with_capacity(vacuums.len());
        for vacuum in &vacuums {
            let ok = call.apply(vacuum).await;
            tracing::debug!(host = vacuum.host(), service = call.name(), ok, "Service call finished");
            outcomes.push((vacuum.host().to_string(), ok));
        }

        for vacuum in &vacuums {
            vacuum.refresh().await;
        }

        outcomes
    }

    async fn resolve(&self, targets: &[&str]) -> Vec<Arc<Vacuum<T>>> {
        let devices = self.devices.read().await;
        if targets.is_empty() {
            let mut all: Vec<_> = devices.values().cloned().collect();
            all.sort_by(|a, b| a.host().cmp(b.host()));
            return all;
        }

        targets
            .iter()
            .filter_map(|host| {
                let vacuum = devices.get(*host).cloned();
                if vacuum.is_none() {
                    tracing::warn!(%host, "No vacuum registered for host");
                }
                vacuum
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::ProtocolVersion;
    use crate::error::FaultKind;
    use crate::protocol::testing::ScriptedTransport;
    use crate::types::{Point, Zone};

    const PROPS: [i64; 14] = [3, 0, 0, 80, 1, 0, 0, 0, 1, 1, 1, 1, 0, 0];

    fn vacuum(host: &str, version: ProtocolVersion) -> Vacuum<ScriptedTransport> {
        Vacuum::new(host, ScriptedTransport::with_props(&PROPS), version)
    }

    #[tokio::test]
    async fn insert_get_remove() {
        let registry = VacuumRegistry::new();
        assert!(registry.is_empty().await);

        registry
            .insert(vacuum("10.0.0.3", ProtocolVersion::ModeAware))
            .await;
        registry
            .insert(vacuum("10.0.0.2", ProtocolVersion::Legacy))
            .await;

        assert_eq!(registry.len().await, 2);
        assert_eq!(registry.hosts().await, vec!["10.0.0.2", "10.0.0.3"]);
        assert_eq!(
            registry.get("10.0.0.2").await.unwrap().protocol_version(),
            ProtocolVersion::Legacy
        );
        assert!(registry.get("10.0.0.9").await.is_none());

        assert!(registry.remove("10.0.0.2").await.is_some());
        assert!(registry.remove("10.0.0.2").await.is_none());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn insert_replaces_same_host() {
        let registry = VacuumRegistry::new();
        registry
            .insert(vacuum("10.0.0.2", ProtocolVersion::Legacy))
            .await;
        registry
            .insert(vacuum("10.0.0.2", ProtocolVersion::ModeAware))
            .await;
        assert_eq!(registry.len().await, 1);
        assert_eq!(
            registry.get("10.0.0.2").await.unwrap().protocol_version(),
            ProtocolVersion::ModeAware
        );
    }

    #[tokio::test]
    async fn dispatch_runs_then_refreshes_targets() {
        let registry = VacuumRegistry::new();
        let a = registry
            .insert(vacuum("10.0.0.2", ProtocolVersion::ModeAware))
            .await;
        let b = registry
            .insert(vacuum("10.0.0.3", ProtocolVersion::ModeAware))
            .await;

        let outcomes = registry
            .dispatch(&ServiceCall::clean_point((150, 200)), &["10.0.0.3"])
            .await;

        assert_eq!(outcomes, vec![("10.0.0.3".to_string(), true)]);
        assert_eq!(
            b.transport().methods(),
            vec!["set_uploadmap", "set_pointclean", "get_prop"]
        );
        assert_eq!(b.last_clean_point(), Some(Point::new(150, 200)));
        assert!(b.is_available());
        assert!(a.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn dispatch_without_targets_addresses_everyone() {
        let registry = VacuumRegistry::new();
        registry
            .insert(vacuum("10.0.0.3", ProtocolVersion::ModeAware))
            .await;
        let legacy = registry
            .insert(vacuum("10.0.0.2", ProtocolVersion::Legacy))
            .await;

        let call = ServiceCall::clean_zone(vec![Zone::new(0, 0, 100, 100)], 2);
        let outcomes = registry.dispatch(&call, &[]).await;

        assert_eq!(
            outcomes,
            vec![
                ("10.0.0.2".to_string(), false),
                ("10.0.0.3".to_string(), true),
            ]
        );
        // Legacy firmware sends nothing for the zone but is still polled.
        assert_eq!(legacy.transport().methods(), vec!["get_prop"]);
    }

    #[tokio::test]
    async fn dispatch_reports_failure_and_skips_unknown_hosts() {
        let registry = VacuumRegistry::new();
        let vac = registry
            .insert(vacuum("10.0.0.2", ProtocolVersion::ModeAware))
            .await;
        vac.transport()
            .fail_method("set_uploadmap", FaultKind::Connectivity);

        let outcomes = registry
            .dispatch(&ServiceCall::clean_point((1, 2)), &["10.0.0.9", "10.0.0.2"])
            .await;

        assert_eq!(outcomes, vec![("10.0.0.2".to_string(), false)]);
        assert_eq!(vac.transport().methods(), vec!["set_uploadmap", "get_prop"]);
    }
}
