// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `WiserHub` - A Rust library to control Drayton Wiser heating systems.
//!
//! This library talks to a Wiser heat hub over its local REST interface
//! and provides async APIs for reading controller state, watching it for
//! changes and driving room and system modes.
//!
//! # Supported Features
//!
//! - **Change monitoring**: named poll loops that publish field-level
//!   change events on a broadcast bus
//! - **Room control**: manual, set, boost, off and auto modes with
//!   set-point clamping
//! - **System control**: normal, away, boost-all-rooms and
//!   cancel-all-overrides
//! - **Status queries**: the full domain dump or any single service
//!   document
//!
//! # Quick Start
//!
//! ## Watching a controller
//!
//! ```no_run
//! use wiserhub::{HubConfig, HubEvent, WiserHub};
//!
//! #[tokio::main]
//! async fn main() -> wiserhub::Result<()> {
//!     let config = HubConfig::new("192.168.1.42", "A1B2C3D4E5")
//!         .with_interval_secs(30);
//!     let hub = WiserHub::new(config)?;
//!
//!     let mut events = hub.subscribe();
//!     hub.start_monitor("monitor").await?;
//!
//!     while let Ok(event) = events.recv().await {
//!         if let HubEvent::Change { record, .. } = event {
//!             println!("{}: {:?}", record.entity_type, record.changed_fields);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Boosting a room
//!
//! ```no_run
//! use wiserhub::{HubConfig, RoomMode, WiserHub};
//!
//! #[tokio::main]
//! async fn main() -> wiserhub::Result<()> {
//!     let hub = WiserHub::new(HubConfig::new("192.168.1.42", "A1B2C3D4E5"))?;
//!
//!     // Boost the lounge to 21.5 °C for 45 minutes.
//!     let outcome = hub
//!         .set_room_mode("Lounge", RoomMode::Boost, 21.5, 45)
//!         .await?;
//!     println!("{} set to {}", outcome.room_name, outcome.mode);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Away mode
//!
//! ```no_run
//! use wiserhub::{HubConfig, SystemMode, WiserHub};
//!
//! #[tokio::main]
//! async fn main() -> wiserhub::Result<()> {
//!     let hub = WiserHub::new(HubConfig::new("192.168.1.42", "A1B2C3D4E5"))?;
//!     hub.set_system_mode(SystemMode::Away).await?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
mod diff;
pub mod error;
pub mod event;
mod hub;
pub mod monitor;
pub mod protocol;
pub mod state;
pub mod types;

pub use command::{RoomModeOutcome, RoomModeSettings};
pub use config::HubConfig;
pub use diff::diff_snapshots;
pub use error::{ConfigError, Error, ParseError, Result, TransportError};
pub use event::{EventBus, HubEvent};
pub use hub::WiserHub;
pub use monitor::MonitorHandle;
pub use protocol::{HubClient, Service};
pub use state::{ChangeRecord, DeviceKind, DeviceLocation, Room, RoomIndex, ScheduleMode, Snapshot};
pub use types::{RoomMode, RoomRef, SystemMode, Temperature};
