// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The hub facade: one controller connection, its monitors and writes.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::command::{RoomModeOutcome, RoomModeSettings, build_patches, build_system_override};
use crate::config::HubConfig;
use crate::error::{Error, Result};
use crate::event::{EventBus, HubEvent};
use crate::monitor::{self, MonitorHandle, MonitorRegistry};
use crate::protocol::{HubClient, Service};
use crate::state::{RoomIndex, Snapshot};
use crate::types::{RoomMode, RoomRef, SystemMode};

/// A single heat hub connection.
///
/// Owns the configuration, the HTTP client, the event bus and the
/// monitor registry. Construct one per controller; independent hubs
/// share nothing. Dropping the hub cancels every monitor it started.
///
/// # Examples
///
/// ```no_run
/// use wiserhub::{HubConfig, WiserHub};
/// use wiserhub::monitor::DEFAULT_MONITOR_REF;
///
/// # async fn example() -> wiserhub::Result<()> {
/// let hub = WiserHub::new(HubConfig::new("192.168.1.42", "A1B2C3D4E5"))?;
///
/// let mut events = hub.subscribe();
/// hub.start_monitor(DEFAULT_MONITOR_REF).await?;
///
/// while let Ok(event) = events.recv().await {
///     println!("{event:?}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WiserHub {
    config: HubConfig,
    client: HubClient,
    events: EventBus,
    monitors: Arc<MonitorRegistry>,
}

impl WiserHub {
    /// Creates a hub for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) kind when
    /// the configuration is invalid. Nothing is contacted yet; use
    /// [`Self::probe`] to check connectivity.
    pub fn new(config: HubConfig) -> Result<Self> {
        let client = HubClient::new(&config)?;
        Ok(Self {
            config,
            client,
            events: EventBus::new(),
            monitors: Arc::new(MonitorRegistry::new()),
        })
    }

    /// Returns the hub's configuration.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Subscribes to the hub's events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.events.subscribe()
    }

    // ===== Reads =====

    /// Fetches the full domain dump as a [`Snapshot`].
    ///
    /// # Errors
    ///
    /// Returns a transport or parse error when the fetch fails.
    pub async fn fetch_full(&self) -> Result<Snapshot> {
        self.client.fetch_full().await
    }

    /// Fetches a single service document.
    ///
    /// # Errors
    ///
    /// Returns a transport or parse error when the fetch fails.
    pub async fn fetch_service(&self, service: Service) -> Result<Value> {
        self.client.get(service).await
    }

    /// Checks connectivity by fetching the controller's brand name.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the controller is unreachable.
    pub async fn probe(&self) -> Result<String> {
        self.client.probe().await
    }

    // ===== Monitors =====

    /// Starts a monitor under `monitor_ref`.
    ///
    /// If a monitor is already registered under that reference it is
    /// cancelled and replaced; re-invoking with the same name is the
    /// supported way to restart. The poll interval comes from the hub
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when the immediate first fetch fails; no
    /// handle is registered in that case.
    pub async fn start_monitor(&self, monitor_ref: impl Into<String>) -> Result<MonitorHandle> {
        monitor::start(
            self.client.clone(),
            self.events.clone(),
            &self.monitors,
            monitor_ref.into(),
            self.config.interval,
        )
        .await
    }

    /// Cancels and deregisters the monitor under `monitor_ref`.
    ///
    /// Returns true if one existed; an absent reference is a no-op, not
    /// an error.
    pub fn remove_monitor(&self, monitor_ref: &str) -> bool {
        let removed = self.monitors.cancel_and_remove(monitor_ref);
        if removed {
            tracing::info!(monitor_ref, "monitor removed");
            self.events.publish(HubEvent::monitor_removed(monitor_ref));
        }
        removed
    }

    /// Returns the handle of the monitor under `monitor_ref`, if any.
    #[must_use]
    pub fn monitor(&self, monitor_ref: &str) -> Option<MonitorHandle> {
        self.monitors.get(monitor_ref)
    }

    /// Returns the registered monitor references, sorted.
    #[must_use]
    pub fn monitor_refs(&self) -> Vec<String> {
        self.monitors.refs()
    }

    /// Cancels and deregisters every monitor.
    pub fn shutdown(&self) {
        for monitor_ref in self.monitors.cancel_all_and_clear() {
            tracing::info!(monitor_ref = %monitor_ref, "monitor removed");
            self.events.publish(HubEvent::monitor_removed(monitor_ref));
        }
    }

    // ===== Writes =====

    /// Sets a room's operating mode.
    ///
    /// Convenience form of [`Self::apply_room_settings`] with explicit
    /// arguments; `boost_temp` is in °C and `boost_duration` in minutes.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::apply_room_settings`].
    pub async fn set_room_mode(
        &self,
        room: impl Into<RoomRef>,
        mode: RoomMode,
        boost_temp: f64,
        boost_duration: u32,
    ) -> Result<RoomModeOutcome> {
        self.apply_room_settings(
            RoomModeSettings::new(room, mode)
                .with_boost_temp(boost_temp)
                .with_boost_duration(boost_duration),
        )
        .await
    }

    /// Applies a room-mode request.
    ///
    /// Resolves the room against a fresh snapshot, translates the mode
    /// into its controller writes and issues them concurrently in
    /// submission order. The outcome reflects the last write only;
    /// earlier writes are best-effort pre-conditioning. A rejected write
    /// fails the whole operation without rolling back writes that
    /// already landed.
    ///
    /// # Errors
    ///
    /// [`Error::FullFetchFailed`] when the snapshot fetch fails,
    /// [`Error::InvalidRoom`] when the room does not resolve (no write
    /// is attempted), [`Error::WriteFailed`] when the controller rejects
    /// a write.
    pub async fn apply_room_settings(&self, settings: RoomModeSettings) -> Result<RoomModeOutcome> {
        Self::execute_room_settings(self.client.clone(), self.config.max_boost, settings).await
    }

    /// Applies a room-mode request without waiting for the outcome.
    ///
    /// The event-driven entry point: failures are logged and published
    /// as [`HubEvent::Error`] instead of being returned.
    pub fn queue_room_settings(&self, settings: RoomModeSettings) {
        let client = self.client.clone();
        let events = self.events.clone();
        let max_boost = self.config.max_boost;

        tokio::spawn(async move {
            let room = settings.room.clone();
            if let Err(error) = Self::execute_room_settings(client, max_boost, settings).await {
                tracing::warn!(room = %room, %error, "queued room settings failed");
                events.publish(HubEvent::error(None, error.to_string()));
            }
        });
    }

    async fn execute_room_settings(
        client: HubClient,
        max_boost: f64,
        settings: RoomModeSettings,
    ) -> Result<RoomModeOutcome> {
        if let RoomRef::Name(name) = &settings.room
            && name.trim().is_empty()
        {
            return Err(Error::InvalidRoom(name.clone()));
        }

        // Fresh snapshot so the lookup and the scheduled set point are
        // current, not whatever a monitor last saw.
        let snapshot = client.fetch_full().await.map_err(Error::full_fetch)?;
        let index = RoomIndex::from_snapshot(&snapshot);

        let Some(room) = index.find_room(&settings.room) else {
            let identifier = match &settings.room {
                RoomRef::Id(id) => id.to_string(),
                RoomRef::Name(name) => name.clone(),
            };
            return Err(Error::InvalidRoom(identifier));
        };

        let plan = build_patches(
            room,
            settings.mode,
            settings.boost_temp,
            settings.boost_duration,
            max_boost,
        );
        let path = Service::Rooms.item_path(plan.room_id);

        tracing::debug!(
            room = %plan.room_name,
            mode = %settings.mode,
            writes = plan.bodies.len(),
            "applying room mode"
        );

        let results = join_all(
            plan.bodies
                .iter()
                .map(|body| client.patch_path(&path, body)),
        )
        .await;

        let mut response = Value::Null;
        for result in results {
            response = result.map_err(Error::write_failed)?;
        }

        Ok(RoomModeOutcome {
            room_id: plan.room_id,
            room_name: plan.room_name,
            mode: settings.mode,
            set_point: plan.set_point,
            response,
        })
    }

    /// Puts the controller into a system-wide operating mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailed`] when the controller rejects the
    /// write.
    pub async fn set_system_mode(&self, mode: SystemMode) -> Result<Value> {
        tracing::debug!(mode = %mode, "setting system mode");
        self.client
            .patch(Service::System, &build_system_override(mode))
            .await
            .map_err(Error::write_failed)
    }

    /// Puts the controller into a system-wide operating mode by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] for an unknown name, before any
    /// write is attempted, and otherwise the same failures as
    /// [`Self::set_system_mode`].
    pub async fn set_system_mode_by_name(&self, name: &str) -> Result<Value> {
        let mode: SystemMode = name.parse()?;
        self.set_system_mode(mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> WiserHub {
        WiserHub::new(HubConfig::new("192.168.1.42", "A1B2C3D4E5")).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(WiserHub::new(HubConfig::new("", "secret")).is_err());
        assert!(WiserHub::new(HubConfig::new("192.168.1.42", "")).is_err());
    }

    #[test]
    fn starts_with_no_monitors() {
        let hub = hub();
        assert!(hub.monitor_refs().is_empty());
        assert!(hub.monitor("monitor").is_none());
    }

    #[test]
    fn removing_an_absent_monitor_is_a_no_op() {
        let hub = hub();
        let mut events = hub.subscribe();

        assert!(!hub.remove_monitor("monitor"));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn invalid_system_mode_name_fails_before_any_write() {
        let hub = hub();

        let result = hub.set_system_mode_by_name("party").await;

        assert!(matches!(result, Err(Error::InvalidMode(name)) if name == "party"));
    }

    #[tokio::test]
    async fn empty_room_names_fail_without_a_fetch() {
        let hub = hub();

        let result = hub
            .apply_room_settings(RoomModeSettings::new("  ", RoomMode::Auto))
            .await;

        assert!(matches!(result, Err(Error::InvalidRoom(_))));
    }
}
