// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for monitor and write notifications.
//!
//! This module provides a pub/sub event system for observing what the
//! hub is doing: monitor ticks, detected changes, failures and monitor
//! lifecycle. The [`EventBus`] uses tokio's broadcast channel so any
//! number of subscribers can listen at once.
//!
//! # Examples
//!
//! ```
//! use wiserhub::event::{EventBus, HubEvent};
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to events
//! let mut rx = bus.subscribe();
//!
//! // Publish an event
//! bus.publish(HubEvent::ping("monitor", false));
//! ```

mod event_bus;
mod hub_event;

pub use event_bus::EventBus;
pub use hub_event::HubEvent;
