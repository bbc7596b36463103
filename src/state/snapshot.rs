// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full-state snapshots of the controller.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ParseError;
use crate::state::Room;

/// System fields that change on every fetch and carry no signal.
pub(crate) const VOLATILE_SYSTEM_FIELDS: [&str; 2] = ["UnixTime", "LocalDateAndTime"];

/// One full fetch of the controller's domain dump, grouped by entity type.
///
/// Records are kept as raw JSON so the diff treats every entity type the
/// same way; typed views ([`Snapshot::rooms`]) are derived on demand.
/// Entity types iterate in sorted order, which keeps diff output
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entities: BTreeMap<String, Vec<Value>>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from the controller's full domain dump.
    ///
    /// Every top-level key is an entity type. Array values are record
    /// sequences; single objects (the `System` document) are wrapped as
    /// one-record sequences so the diff can treat them uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedShape`] when the dump is not a
    /// JSON object.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        let Value::Object(map) = value else {
            return Err(ParseError::UnexpectedShape(
                "domain dump is not a JSON object".to_string(),
            ));
        };

        let mut entities = BTreeMap::new();
        for (entity_type, entry) in map {
            let records = match entry {
                Value::Array(records) => records,
                single => vec![single],
            };
            entities.insert(entity_type, records);
        }

        Ok(Self { entities })
    }

    /// Removes the volatile `System` fields that differ on every fetch.
    ///
    /// Without this, every diff would report a time change.
    pub fn strip_volatile(&mut self) {
        if let Some(records) = self.entities.get_mut("System") {
            for record in records {
                if let Value::Object(fields) = record {
                    for field in VOLATILE_SYSTEM_FIELDS {
                        fields.remove(field);
                    }
                }
            }
        }
    }

    /// Returns the entity types present, in sorted order.
    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Returns the records of one entity type, empty when absent.
    #[must_use]
    pub fn records(&self, entity_type: &str) -> &[Value] {
        self.entities
            .get(entity_type)
            .map_or(&[], Vec::as_slice)
    }

    /// Returns one record by entity type and position.
    #[must_use]
    pub fn record(&self, entity_type: &str, index: usize) -> Option<&Value> {
        self.records(entity_type).get(index)
    }

    /// Returns the typed view of the `Room` records.
    ///
    /// Records that fail to parse are skipped with a warning rather than
    /// failing the whole snapshot.
    #[must_use]
    pub fn rooms(&self) -> Vec<Room> {
        self.records("Room")
            .iter()
            .filter_map(|record| match serde_json::from_value(record.clone()) {
                Ok(room) => Some(room),
                Err(error) => {
                    tracing::warn!(%error, "skipping unparseable room record");
                    None
                }
            })
            .collect()
    }

    /// Returns true if the snapshot holds no entity types at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wraps_single_objects_as_one_record() {
        let snapshot = Snapshot::from_value(json!({
            "System": {"HeatingButtonOverrideState": "Off"},
            "Room": [{"id": 1, "Name": "Kitchen"}],
        }))
        .unwrap();

        assert_eq!(snapshot.records("System").len(), 1);
        assert_eq!(snapshot.records("Room").len(), 1);
        assert_eq!(snapshot.records("Device").len(), 0);
    }

    #[test]
    fn rejects_non_object_dump() {
        let result = Snapshot::from_value(json!([1, 2, 3]));
        assert!(result.is_err());
    }

    #[test]
    fn strips_volatile_system_fields() {
        let mut snapshot = Snapshot::from_value(json!({
            "System": {
                "UnixTime": 1_700_000_000,
                "LocalDateAndTime": {"Year": 2023},
                "HeatingButtonOverrideState": "Off",
            },
        }))
        .unwrap();

        snapshot.strip_volatile();

        let system = snapshot.record("System", 0).unwrap();
        assert!(system.get("UnixTime").is_none());
        assert!(system.get("LocalDateAndTime").is_none());
        assert_eq!(
            system.get("HeatingButtonOverrideState"),
            Some(&json!("Off"))
        );
    }

    #[test]
    fn stripping_twice_is_idempotent() {
        let mut snapshot = Snapshot::from_value(json!({
            "System": {"UnixTime": 1, "Brand": "WiserHeat"},
        }))
        .unwrap();

        snapshot.strip_volatile();
        let once = snapshot.clone();
        snapshot.strip_volatile();

        assert_eq!(snapshot, once);
    }

    #[test]
    fn entity_types_iterate_sorted() {
        let snapshot = Snapshot::from_value(json!({
            "Room": [],
            "Device": [],
            "System": {},
        }))
        .unwrap();

        let types: Vec<&str> = snapshot.entity_types().collect();
        assert_eq!(types, ["Device", "Room", "System"]);
    }

    #[test]
    fn typed_rooms_skip_garbage_records() {
        let snapshot = Snapshot::from_value(json!({
            "Room": [
                {"id": 1, "Name": "Kitchen"},
                "not a room",
                {"id": 2, "Name": "Office", "ScheduledSetPoint": 195},
            ],
        }))
        .unwrap();

        let rooms = snapshot.rooms();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name, "Kitchen");
        assert_eq!(rooms[1].scheduled_set_point, Some(195));
    }
}
