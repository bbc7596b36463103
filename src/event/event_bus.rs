// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting hub events.

use tokio::sync::broadcast;

use super::HubEvent;

/// Events buffered per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 256;

/// Broadcast fan-out for [`HubEvent`]s.
///
/// Cloning the bus clones the publishing side only: every clone feeds
/// the same channel, and each subscriber receives its own copy of every
/// event published after it subscribed. A subscriber that falls more
/// than 256 events behind loses the oldest ones and sees a
/// `RecvError::Lagged` when it catches up.
///
/// # Examples
///
/// ```
/// use wiserhub::event::{EventBus, HubEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(HubEvent::ping("monitor", false));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<HubEvent>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribes to every event published from this point on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event to all current subscribers.
    ///
    /// An event published while nobody is subscribed is dropped.
    pub fn publish(&self, event: HubEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChangeRecord;
    use serde_json::{Map, json};

    #[tokio::test]
    async fn every_subscriber_gets_its_own_copy() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(HubEvent::ping("monitor", true));

        assert!(first.recv().await.unwrap().is_ping());
        assert!(second.recv().await.unwrap().is_ping());
    }

    #[tokio::test]
    async fn change_payloads_arrive_intact() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let mut changed = Map::new();
        changed.insert("CalculatedTemperature".to_string(), json!(195));
        bus.publish(HubEvent::change(
            "monitor",
            ChangeRecord {
                entity_type: "Room".to_string(),
                index: 0,
                id: Some(3),
                changed_fields: changed,
                previous_fields: Map::new(),
                room_name: Some("Lounge".to_string()),
            },
        ));

        let HubEvent::Change { record, .. } = rx.recv().await.unwrap() else {
            panic!("expected a change event");
        };
        assert_eq!(record.room_name.as_deref(), Some("Lounge"));
        assert_eq!(record.changed_fields["CalculatedTemperature"], json!(195));
    }

    #[tokio::test]
    async fn events_before_subscribing_are_dropped() {
        let bus = EventBus::new();

        // Nobody is listening yet.
        bus.publish(HubEvent::error(None, "queued write failed"));

        let mut rx = bus.subscribe();
        bus.publish(HubEvent::monitor_removed("monitor"));

        assert!(rx.recv().await.unwrap().is_monitor_lifecycle());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn clones_publish_into_the_same_channel() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.clone().publish(HubEvent::ping("monitor", false));

        assert_eq!(rx.recv().await.unwrap().monitor_ref(), Some("monitor"));
    }
}
