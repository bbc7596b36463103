// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub event types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::state::ChangeRecord;

/// Events emitted by monitors and write operations.
///
/// Every event carries the detection timestamp; monitor events carry the
/// reference of the monitor that produced them, so subscribers can tell
/// concurrently running monitors apart.
///
/// # Examples
///
/// ```
/// use wiserhub::event::{EventBus, HubEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(HubEvent::ping("monitor", true));
///
/// let event = rx.try_recv().unwrap();
/// assert!(event.is_ping());
/// assert_eq!(event.monitor_ref(), Some("monitor"));
/// ```
#[derive(Debug, Clone)]
pub enum HubEvent {
    /// A monitor tick fetched the controller successfully.
    Ping {
        /// The monitor that performed the fetch.
        monitor_ref: String,
        /// When the fetch completed.
        at: DateTime<Utc>,
        /// True for the immediate fetch performed at monitor start.
        initial_run: bool,
    },

    /// One record changed between two consecutive snapshots.
    Change {
        /// The monitor that detected the change.
        monitor_ref: String,
        /// When the change was detected.
        at: DateTime<Utc>,
        /// What changed.
        record: ChangeRecord,
    },

    /// A fetch or write failed.
    Error {
        /// The monitor the failure belongs to, `None` for failures
        /// outside any monitor (fire-and-forget writes).
        monitor_ref: Option<String>,
        /// When the failure was observed.
        at: DateTime<Utc>,
        /// Human-readable failure description.
        message: String,
    },

    /// A monitor handle was registered and its loop is running.
    MonitorRegistered {
        /// The reference the monitor was registered under.
        monitor_ref: String,
        /// Cancelling this token stops the monitor's loop.
        cancel: CancellationToken,
        /// The poll interval the monitor runs at.
        interval: Duration,
    },

    /// A monitor was cancelled and removed from the registry.
    MonitorRemoved {
        /// The reference that was removed.
        monitor_ref: String,
    },
}

impl HubEvent {
    /// Returns the monitor reference this event belongs to, if any.
    #[must_use]
    pub fn monitor_ref(&self) -> Option<&str> {
        match self {
            Self::Ping { monitor_ref, .. }
            | Self::Change { monitor_ref, .. }
            | Self::MonitorRegistered { monitor_ref, .. }
            | Self::MonitorRemoved { monitor_ref } => Some(monitor_ref),
            Self::Error { monitor_ref, .. } => monitor_ref.as_deref(),
        }
    }

    /// Returns `true` if this is a ping event.
    #[must_use]
    pub fn is_ping(&self) -> bool {
        matches!(self, Self::Ping { .. })
    }

    /// Returns `true` if this is a change event.
    #[must_use]
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Change { .. })
    }

    /// Returns `true` if this is an error event.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns `true` if this is a monitor lifecycle event
    /// (registered/removed).
    #[must_use]
    pub fn is_monitor_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::MonitorRegistered { .. } | Self::MonitorRemoved { .. }
        )
    }

    /// Creates a ping event stamped with the current time.
    #[must_use]
    pub fn ping(monitor_ref: impl Into<String>, initial_run: bool) -> Self {
        Self::Ping {
            monitor_ref: monitor_ref.into(),
            at: Utc::now(),
            initial_run,
        }
    }

    /// Creates a change event stamped with the current time.
    #[must_use]
    pub fn change(monitor_ref: impl Into<String>, record: ChangeRecord) -> Self {
        Self::Change {
            monitor_ref: monitor_ref.into(),
            at: Utc::now(),
            record,
        }
    }

    /// Creates an error event stamped with the current time.
    #[must_use]
    pub fn error(monitor_ref: Option<String>, message: impl Into<String>) -> Self {
        Self::Error {
            monitor_ref,
            at: Utc::now(),
            message: message.into(),
        }
    }

    /// Creates a monitor-registered event.
    #[must_use]
    pub fn monitor_registered(
        monitor_ref: impl Into<String>,
        cancel: CancellationToken,
        interval: Duration,
    ) -> Self {
        Self::MonitorRegistered {
            monitor_ref: monitor_ref.into(),
            cancel,
            interval,
        }
    }

    /// Creates a monitor-removed event.
    #[must_use]
    pub fn monitor_removed(monitor_ref: impl Into<String>) -> Self {
        Self::MonitorRemoved {
            monitor_ref: monitor_ref.into(),
        }
    }
}
