// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller state: snapshots, the room index and change records.
//!
//! A [`Snapshot`] is one full fetch of the controller's domain dump,
//! kept as raw JSON records grouped by entity type. The [`RoomIndex`]
//! is the typed lookup table derived from it, and a [`ChangeRecord`]
//! describes one record's field changes between two snapshots.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use wiserhub::state::{RoomIndex, Snapshot};
//!
//! let snapshot = Snapshot::from_value(json!({
//!     "Room": [{"id": 1, "Name": "Kitchen", "ScheduledSetPoint": 180}],
//! })).unwrap();
//!
//! let index = RoomIndex::from_snapshot(&snapshot);
//! assert_eq!(index.find_room_by_name("Kitchen").unwrap().id, 1);
//! ```

mod change_record;
mod room_index;
mod snapshot;

pub use change_record::ChangeRecord;
pub use room_index::{DeviceKind, DeviceLocation, Room, RoomIndex, ScheduleMode};
pub use snapshot::Snapshot;

pub(crate) use snapshot::VOLATILE_SYSTEM_FIELDS;
