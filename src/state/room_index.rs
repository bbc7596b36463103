// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room lookup tables derived from a snapshot.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::state::Snapshot;
use crate::types::RoomRef;

/// The schedule-following state a room reports for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ScheduleMode {
    /// The room follows its schedule.
    Auto,
    /// The room is under a manual override.
    Manual,
    /// A mode this library does not know about.
    #[serde(other)]
    Unknown,
}

/// Typed view of one `Room` record.
///
/// Only the fields the library acts on are parsed; everything else stays
/// in the raw snapshot record. Set points are in the controller's
/// tenths-of-a-degree wire units. All fields except `id` tolerate being
/// absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Room {
    /// The controller-assigned room id.
    pub id: i64,
    /// The display name, empty when the controller has none.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// The reported schedule mode.
    #[serde(rename = "Mode", default)]
    pub mode: Option<ScheduleMode>,
    /// The scheduled set point in wire units.
    #[serde(rename = "ScheduledSetPoint", default)]
    pub scheduled_set_point: Option<i64>,
    /// Ids of the radiator valves assigned to this room.
    #[serde(rename = "SmartValveIds", default)]
    pub smart_valve_ids: Vec<i64>,
    /// Id of the room thermostat, if one is paired.
    #[serde(rename = "RoomStatId", default)]
    pub room_stat_id: Option<i64>,
    /// Ids of the smart plugs assigned to this room.
    #[serde(rename = "SmartPlugIds", default)]
    pub smart_plug_ids: Vec<i64>,
}

/// The kind of device a room can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A thermostatic radiator valve.
    SmartValve,
    /// A room thermostat.
    RoomStat,
    /// A smart plug.
    SmartPlug,
}

impl DeviceKind {
    /// Returns the entity-type name the controller uses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SmartValve => "SmartValve",
            Self::RoomStat => "RoomStat",
            Self::SmartPlug => "SmartPlug",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a device lives: its room and what it is.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLocation {
    /// Id of the owning room.
    pub room_id: i64,
    /// Display name of the owning room.
    pub room_name: String,
    /// What kind of device this is.
    pub kind: DeviceKind,
}

/// Lookup tables from room ids, room names and device ids to rooms.
///
/// Rebuilt wholesale from each snapshot; lookups between rebuilds are
/// pure and touch no other state. Lookups are linear scans, which is
/// plenty for the handful of rooms a home controller manages. When
/// several rooms share a name the first in controller order wins and a
/// warning is logged.
#[derive(Debug, Clone, Default)]
pub struct RoomIndex {
    rooms: Vec<Room>,
    devices: HashMap<i64, DeviceLocation>,
}

impl RoomIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index directly from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut index = Self::new();
        index.rebuild(snapshot);
        index
    }

    /// Replaces the index contents from a snapshot.
    pub fn rebuild(&mut self, snapshot: &Snapshot) {
        self.rooms = snapshot.rooms();
        self.devices.clear();

        for room in &self.rooms {
            for &device_id in &room.smart_valve_ids {
                Self::insert_device(&mut self.devices, device_id, room, DeviceKind::SmartValve);
            }
            if let Some(device_id) = room.room_stat_id {
                Self::insert_device(&mut self.devices, device_id, room, DeviceKind::RoomStat);
            }
            for &device_id in &room.smart_plug_ids {
                Self::insert_device(&mut self.devices, device_id, room, DeviceKind::SmartPlug);
            }
        }
    }

    // Takes the map, not `&mut self`: `rebuild` is still iterating
    // `self.rooms` when it inserts.
    fn insert_device(
        devices: &mut HashMap<i64, DeviceLocation>,
        device_id: i64,
        room: &Room,
        kind: DeviceKind,
    ) {
        devices.insert(
            device_id,
            DeviceLocation {
                room_id: room.id,
                room_name: room.name.clone(),
                kind,
            },
        );
    }

    /// Returns all indexed rooms in controller order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Looks a room up by its controller id.
    ///
    /// Never fails: a miss returns `None` and logs a diagnostic.
    #[must_use]
    pub fn find_room_by_id(&self, id: i64) -> Option<&Room> {
        let room = self.rooms.iter().find(|room| room.id == id);
        if room.is_none() {
            tracing::warn!(id, "no room with this id");
        }
        room
    }

    /// Looks a room up by display name, exact and case-sensitive.
    ///
    /// Never fails: a miss returns `None` and logs a diagnostic.
    #[must_use]
    pub fn find_room_by_name(&self, name: &str) -> Option<&Room> {
        let mut matches = self.rooms.iter().filter(|room| room.name == name);
        let first = matches.next();

        if first.is_none() {
            tracing::warn!(name, "no room with this name");
        } else if matches.next().is_some() {
            tracing::warn!(name, "several rooms share this name, using the first");
        }

        first
    }

    /// Looks a room up by id or name.
    ///
    /// A name that is all digits is treated as an id, so string-typed
    /// callers can still address rooms numerically.
    #[must_use]
    pub fn find_room(&self, room: &RoomRef) -> Option<&Room> {
        match room {
            RoomRef::Id(id) => self.find_room_by_id(*id),
            RoomRef::Name(name) => match name.parse::<i64>() {
                Ok(id) => self.find_room_by_id(id),
                Err(_) => self.find_room_by_name(name),
            },
        }
    }

    /// Returns the room and kind a device id belongs to.
    #[must_use]
    pub fn device_location(&self, device_id: i64) -> Option<&DeviceLocation> {
        self.devices.get(&device_id)
    }
}
