// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot differ.
//!
//! Compares two snapshots record by record and reports updated values:
//! fields present in both versions of a record whose values differ. A
//! record with no previous counterpart reports all its fields. Fields a
//! record loses are not reported; the next full snapshot replaces the
//! baseline anyway.

use serde_json::{Map, Value};

use crate::state::{ChangeRecord, RoomIndex, Snapshot, VOLATILE_SYSTEM_FIELDS};

/// Fields that flap with radio conditions and drown out real changes.
const NOISE_FIELDS: [&str; 3] = [
    "ReceptionOfController",
    "ReceptionOfDevice",
    "PendingZigbeeMessageMask",
];

fn is_reportable(entity_type: &str, field: &str) -> bool {
    if NOISE_FIELDS.contains(&field) {
        return false;
    }
    if entity_type == "System" && VOLATILE_SYSTEM_FIELDS.contains(&field) {
        return false;
    }
    true
}

fn room_name_for(
    entity_type: &str,
    fields: &Map<String, Value>,
    id: Option<i64>,
    index: &RoomIndex,
) -> Option<String> {
    if entity_type == "Room" {
        return fields
            .get("Name")
            .and_then(Value::as_str)
            .map(ToString::to_string);
    }
    id.and_then(|id| index.device_location(id))
        .map(|location| location.room_name.clone())
}

/// Compares `current` against `previous` and returns one [`ChangeRecord`]
/// per record with observable changes.
///
/// Output order is deterministic: entity types sorted, records in
/// controller order within each type. Records whose only changes are
/// noise fields are suppressed entirely. The `index` resolves device ids
/// to room names; pass the index built from `current`.
#[must_use]
pub fn diff_snapshots(
    previous: &Snapshot,
    current: &Snapshot,
    index: &RoomIndex,
) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();

    for entity_type in current.entity_types() {
        for (position, record) in current.records(entity_type).iter().enumerate() {
            let Value::Object(fields) = record else {
                continue;
            };

            let mut changed_fields = Map::new();
            let mut previous_fields = Map::new();

            match previous.record(entity_type, position) {
                Some(Value::Object(prev)) => {
                    for (field, value) in fields {
                        if !is_reportable(entity_type, field) {
                            continue;
                        }
                        if let Some(old) = prev.get(field)
                            && old != value
                        {
                            changed_fields.insert(field.clone(), value.clone());
                            previous_fields.insert(field.clone(), old.clone());
                        }
                    }
                }
                // No previous counterpart: the whole record is new.
                _ => {
                    for (field, value) in fields {
                        if is_reportable(entity_type, field) {
                            changed_fields.insert(field.clone(), value.clone());
                        }
                    }
                }
            }

            if changed_fields.is_empty() {
                continue;
            }

            let id = fields.get("id").and_then(Value::as_i64);
            let room_name = room_name_for(entity_type, fields, id, index);

            changes.push(ChangeRecord {
                entity_type: entity_type.to_string(),
                index: position,
                id,
                changed_fields,
                previous_fields,
                room_name,
            });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> Snapshot {
        Snapshot::from_value(value).unwrap()
    }

    #[test]
    fn equal_snapshots_diff_to_empty() {
        let a = snapshot(json!({
            "Room": [{"id": 1, "Name": "Kitchen", "CalculatedTemperature": 185}],
            "System": {"HeatingButtonOverrideState": "Off"},
        }));
        let b = a.clone();

        assert!(diff_snapshots(&a, &b, &RoomIndex::new()).is_empty());
    }

    #[test]
    fn reports_changed_value_with_previous() {
        let previous = snapshot(json!({
            "Room": [{"id": 1, "Name": "Kitchen", "CalculatedTemperature": 185}],
        }));
        let current = snapshot(json!({
            "Room": [{"id": 1, "Name": "Kitchen", "CalculatedTemperature": 190}],
        }));
        let index = RoomIndex::from_snapshot(&current);

        let changes = diff_snapshots(&previous, &current, &index);

        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.entity_type, "Room");
        assert_eq!(change.index, 0);
        assert_eq!(change.id, Some(1));
        assert_eq!(change.room_name.as_deref(), Some("Kitchen"));
        assert_eq!(change.changed_fields.get("CalculatedTemperature"), Some(&json!(190)));
        assert_eq!(change.previous_fields.get("CalculatedTemperature"), Some(&json!(185)));
        assert!(!change.changed_fields.is_empty());
    }

    #[test]
    fn added_fields_on_existing_records_are_not_reported() {
        let previous = snapshot(json!({
            "Room": [{"id": 1, "Name": "Kitchen"}],
        }));
        let current = snapshot(json!({
            "Room": [{"id": 1, "Name": "Kitchen", "OverrideType": "Manual"}],
        }));
        let index = RoomIndex::from_snapshot(&current);

        assert!(diff_snapshots(&previous, &current, &index).is_empty());
    }

    #[test]
    fn new_record_reports_all_fields_with_empty_previous() {
        let previous = snapshot(json!({"Room": [{"id": 1, "Name": "Kitchen"}]}));
        let current = snapshot(json!({
            "Room": [
                {"id": 1, "Name": "Kitchen"},
                {"id": 2, "Name": "Office", "CalculatedTemperature": 201},
            ],
        }));
        let index = RoomIndex::from_snapshot(&current);

        let changes = diff_snapshots(&previous, &current, &index);

        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.id, Some(2));
        assert_eq!(change.changed_fields.len(), 3);
        assert!(change.previous_fields.is_empty());
        assert_eq!(change.room_name.as_deref(), Some("Office"));
    }

    #[test]
    fn noise_only_changes_are_suppressed() {
        let previous = snapshot(json!({
            "Device": [{"id": 20, "ReceptionOfController": {"Rssi": -60}, "ReceptionOfDevice": {"Rssi": -58}}],
        }));
        let current = snapshot(json!({
            "Device": [{"id": 20, "ReceptionOfController": {"Rssi": -71}, "ReceptionOfDevice": {"Rssi": -64}}],
        }));

        assert!(diff_snapshots(&previous, &current, &RoomIndex::new()).is_empty());
    }

    #[test]
    fn volatile_system_fields_never_participate() {
        // Even without strip_volatile, time fields must not show up.
        let previous = snapshot(json!({
            "System": {"UnixTime": 1000, "LocalDateAndTime": {"Hour": 9}, "EcoModeEnabled": false},
        }));
        let current = snapshot(json!({
            "System": {"UnixTime": 2000, "LocalDateAndTime": {"Hour": 10}, "EcoModeEnabled": true},
        }));

        let changes = diff_snapshots(&previous, &current, &RoomIndex::new());

        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.changed_fields.len(), 1);
        assert_eq!(change.changed_fields.get("EcoModeEnabled"), Some(&json!(true)));
    }

    #[test]
    fn device_changes_resolve_room_via_index() {
        let previous = snapshot(json!({
            "Device": [{"id": 20, "BatteryLevel": "Normal"}],
            "Room": [{"id": 1, "Name": "Kitchen", "SmartValveIds": [20]}],
        }));
        let current = snapshot(json!({
            "Device": [{"id": 20, "BatteryLevel": "Low"}],
            "Room": [{"id": 1, "Name": "Kitchen", "SmartValveIds": [20]}],
        }));
        let index = RoomIndex::from_snapshot(&current);

        let changes = diff_snapshots(&previous, &current, &index);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].entity_type, "Device");
        assert_eq!(changes[0].room_name.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn output_order_is_sorted_by_entity_type() {
        let previous = snapshot(json!({
            "Room": [{"id": 1, "Mode": "Auto"}],
            "Device": [{"id": 20, "BatteryLevel": "Normal"}],
        }));
        let current = snapshot(json!({
            "Room": [{"id": 1, "Mode": "Manual"}],
            "Device": [{"id": 20, "BatteryLevel": "Low"}],
        }));

        let changes = diff_snapshots(&previous, &current, &RoomIndex::new());

        let types: Vec<&str> = changes.iter().map(|c| c.entity_type.as_str()).collect();
        assert_eq!(types, ["Device", "Room"]);
    }

    #[test]
    fn deep_values_compare_structurally() {
        let previous = snapshot(json!({
            "HeatingChannel": [{"id": 5, "HeatingRelayState": "Off", "TimerState": {"On": false}}],
        }));
        let current = snapshot(json!({
            "HeatingChannel": [{"id": 5, "HeatingRelayState": "Off", "TimerState": {"On": true}}],
        }));

        let changes = diff_snapshots(&previous, &current, &RoomIndex::new());

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].changed_fields.get("TimerState"), Some(&json!({"On": true})));
    }
}
