// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named, repeating poll loops over the controller.
//!
//! A monitor fetches the full domain dump on a fixed interval, diffs it
//! against the previous fetch and publishes the result as events. Any
//! number of independently named monitors can run against the same
//! controller; each owns its own baseline snapshot and room index, so
//! they never contend. Starting a monitor under a name that is already
//! registered cancels and replaces the old one: re-invoking with the
//! same name is the supported way to restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::diff::diff_snapshots;
use crate::error::Result;
use crate::event::{EventBus, HubEvent};
use crate::protocol::HubClient;
use crate::state::{RoomIndex, Snapshot};

/// The reserved default monitor reference.
pub const DEFAULT_MONITOR_REF: &str = "monitor";

/// A registered monitor: its reference, cancel token and interval.
///
/// Handles are cheap to clone; all clones share the same cancel token.
/// The same handle is carried by the
/// [`MonitorRegistered`](HubEvent::MonitorRegistered) event's token, so
/// subscribers can stop a monitor they did not start.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    monitor_ref: String,
    cancel: CancellationToken,
    interval: Duration,
}

impl MonitorHandle {
    /// Returns the reference this monitor is registered under.
    #[must_use]
    pub fn monitor_ref(&self) -> &str {
        &self.monitor_ref
    }

    /// Returns the poll interval the monitor runs at.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the monitor's cancel token.
    #[must_use]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Stops the monitor's loop.
    ///
    /// Stops future ticks immediately; an in-flight fetch is discarded
    /// when it resolves. Does not remove the registry entry; use
    /// `remove_monitor` on the hub for that.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true once the monitor has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Registry of monitors, keyed by reference.
///
/// Dropping the registry cancels every remaining monitor, so loops never
/// outlive the hub that spawned them.
#[derive(Debug, Default)]
pub(crate) struct MonitorRegistry {
    handles: RwLock<HashMap<String, MonitorHandle>>,
}

impl MonitorRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a handle under its reference.
    ///
    /// Cancels and returns the handle it displaces: a handle evicted
    /// from the registry must never keep a live loop.
    pub(crate) fn insert(&self, handle: MonitorHandle) -> Option<MonitorHandle> {
        let evicted = self
            .handles
            .write()
            .insert(handle.monitor_ref.clone(), handle);
        if let Some(old) = &evicted {
            old.cancel();
        }
        evicted
    }

    /// Cancels and removes the handle under `monitor_ref`.
    ///
    /// Returns true if one existed; an absent reference is a no-op.
    pub(crate) fn cancel_and_remove(&self, monitor_ref: &str) -> bool {
        match self.handles.write().remove(monitor_ref) {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Returns the handle registered under `monitor_ref`, if any.
    pub(crate) fn get(&self, monitor_ref: &str) -> Option<MonitorHandle> {
        self.handles.read().get(monitor_ref).cloned()
    }

    /// Returns the registered references, sorted.
    pub(crate) fn refs(&self) -> Vec<String> {
        let mut refs: Vec<String> = self.handles.read().keys().cloned().collect();
        refs.sort();
        refs
    }

    /// Cancels every monitor and empties the registry.
    ///
    /// Returns the removed references, sorted.
    pub(crate) fn cancel_all_and_clear(&self) -> Vec<String> {
        let handles: Vec<MonitorHandle> = {
            let mut map = self.handles.write();
            map.drain().map(|(_, handle)| handle).collect()
        };

        let mut refs = Vec::with_capacity(handles.len());
        for handle in handles {
            handle.cancel();
            refs.push(handle.monitor_ref);
        }
        refs.sort();
        refs
    }
}

impl Drop for MonitorRegistry {
    fn drop(&mut self) {
        for handle in self.handles.get_mut().values() {
            handle.cancel();
        }
    }
}

/// Starts a monitor under `monitor_ref`, replacing any prior one.
///
/// Performs the immediate first fetch before anything is registered: a
/// monitor that cannot reach the controller once leaves no handle
/// behind and returns the fetch error after publishing it.
pub(crate) async fn start(
    client: HubClient,
    events: EventBus,
    registry: &Arc<MonitorRegistry>,
    monitor_ref: String,
    interval: Duration,
) -> Result<MonitorHandle> {
    if registry.cancel_and_remove(&monitor_ref) {
        tracing::info!(monitor_ref = %monitor_ref, "replacing running monitor");
        events.publish(HubEvent::monitor_removed(monitor_ref.as_str()));
    }

    let mut snapshot = match client.fetch_full().await {
        Ok(snapshot) => snapshot,
        Err(error) => {
            events.publish(HubEvent::error(Some(monitor_ref.clone()), error.to_string()));
            return Err(error);
        }
    };

    events.publish(HubEvent::ping(monitor_ref.as_str(), true));
    snapshot.strip_volatile();

    let cancel = CancellationToken::new();
    let handle = MonitorHandle {
        monitor_ref: monitor_ref.clone(),
        cancel: cancel.clone(),
        interval,
    };

    tracing::info!(monitor_ref = %monitor_ref, ?interval, "monitor started");

    tokio::spawn(run_loop(
        client,
        events.clone(),
        monitor_ref.clone(),
        interval,
        cancel,
        snapshot,
    ));

    // A concurrent start under the same ref can register while our
    // initial fetch is in flight; insert cancels what it evicts.
    if registry.insert(handle.clone()).is_some() {
        tracing::info!(monitor_ref = %monitor_ref, "replacing concurrently started monitor");
        events.publish(HubEvent::monitor_removed(monitor_ref.as_str()));
    }
    events.publish(HubEvent::monitor_registered(
        monitor_ref.as_str(),
        handle.cancel_token().clone(),
        interval,
    ));

    Ok(handle)
}

/// The repeating tick loop: fetch, diff against the previous snapshot,
/// publish, replace the baseline.
///
/// A failed tick publishes an error and keeps both the baseline and the
/// loop; recovery is simply the next tick. Cancellation is checked again
/// after each fetch resolves, so a fetch already in flight when the
/// monitor is cancelled is discarded instead of touching state.
async fn run_loop(
    client: HubClient,
    events: EventBus,
    monitor_ref: String,
    interval: Duration,
    cancel: CancellationToken,
    mut previous: Snapshot,
) {
    let mut index = RoomIndex::from_snapshot(&previous);

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick of `interval` fires immediately; the initial fetch
    // already covered it.
    tokio::select! {
        () = cancel.cancelled() => return,
        _ = ticker.tick() => {}
    }

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let fetched = tokio::select! {
            () = cancel.cancelled() => break,
            result = client.fetch_full() => result,
        };

        // Cancelled between the fetch resolving and this point: the
        // handle may already be gone, so do not emit or update anything.
        if cancel.is_cancelled() {
            break;
        }

        match fetched {
            Ok(mut snapshot) => {
                events.publish(HubEvent::ping(monitor_ref.as_str(), false));

                snapshot.strip_volatile();
                index.rebuild(&snapshot);

                for record in diff_snapshots(&previous, &snapshot, &index) {
                    events.publish(HubEvent::change(monitor_ref.as_str(), record));
                }

                previous = snapshot;
            }
            Err(error) => {
                tracing::warn!(monitor_ref = %monitor_ref, %error, "monitor tick failed");
                events.publish(HubEvent::error(Some(monitor_ref.clone()), error.to_string()));
            }
        }
    }

    tracing::info!(monitor_ref = %monitor_ref, "monitor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(monitor_ref: &str) -> MonitorHandle {
        MonitorHandle {
            monitor_ref: monitor_ref.to_string(),
            cancel: CancellationToken::new(),
            interval: Duration::from_secs(60),
        }
    }

    #[test]
    fn insert_and_get() {
        let registry = MonitorRegistry::new();
        registry.insert(handle("monitor"));

        let found = registry.get("monitor").unwrap();
        assert_eq!(found.monitor_ref(), "monitor");
        assert_eq!(found.interval(), Duration::from_secs(60));
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn cancel_and_remove_cancels_the_handle() {
        let registry = MonitorRegistry::new();
        let h = handle("monitor");
        let token = h.cancel_token().clone();
        registry.insert(h);

        assert!(registry.cancel_and_remove("monitor"));
        assert!(token.is_cancelled());
        assert!(registry.get("monitor").is_none());
    }

    #[test]
    fn removing_an_absent_ref_is_a_no_op() {
        let registry = MonitorRegistry::new();
        assert!(!registry.cancel_and_remove("monitor"));
    }

    #[test]
    fn refs_are_sorted() {
        let registry = MonitorRegistry::new();
        registry.insert(handle("zulu"));
        registry.insert(handle("alpha"));

        assert_eq!(registry.refs(), ["alpha", "zulu"]);
    }

    #[test]
    fn reinsert_cancels_the_displaced_handle() {
        let registry = MonitorRegistry::new();
        let first = handle("monitor");
        let first_token = first.cancel_token().clone();
        registry.insert(first);

        let evicted = registry.insert(handle("monitor"));

        assert_eq!(registry.refs().len(), 1);
        assert!(evicted.is_some_and(|old| old.is_cancelled()));
        assert!(first_token.is_cancelled());
        // The replacement keeps its own live token.
        assert!(!registry.get("monitor").unwrap().is_cancelled());
    }

    #[test]
    fn cancel_all_and_clear_cancels_everything() {
        let registry = MonitorRegistry::new();
        let a = handle("a");
        let b = handle("b");
        let token_a = a.cancel_token().clone();
        let token_b = b.cancel_token().clone();
        registry.insert(a);
        registry.insert(b);

        let removed = registry.cancel_all_and_clear();

        assert_eq!(removed, ["a", "b"]);
        assert!(token_a.is_cancelled());
        assert!(token_b.is_cancelled());
        assert!(registry.refs().is_empty());
    }

    #[test]
    fn dropping_the_registry_cancels_monitors() {
        let registry = MonitorRegistry::new();
        let h = handle("monitor");
        let token = h.cancel_token().clone();
        registry.insert(h);

        drop(registry);

        assert!(token.is_cancelled());
    }

    #[test]
    fn handle_cancel_is_shared_across_clones() {
        let h = handle("monitor");
        let clone = h.clone();

        h.cancel();

        assert!(clone.is_cancelled());
    }
}
