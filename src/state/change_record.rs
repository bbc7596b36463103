// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observed changes between two snapshots.

use serde_json::{Map, Value};

/// One record's observed field changes between two snapshots.
///
/// `changed_fields` holds the new values, `previous_fields` the old ones
/// for the same keys. A record that had no previous counterpart reports
/// all its fields as changed with empty `previous_fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    /// The entity type the record belongs to (`Room`, `Device`, ...).
    pub entity_type: String,
    /// Position of the record within its entity type.
    pub index: usize,
    /// The record's own id, when it carries one.
    pub id: Option<i64>,
    /// Fields whose values differ, with their new values.
    pub changed_fields: Map<String, Value>,
    /// The previous values of the changed fields.
    pub previous_fields: Map<String, Value>,
    /// The room this record belongs to, when one can be determined.
    pub room_name: Option<String>,
}

impl ChangeRecord {
    /// Returns the names of the changed fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.changed_fields.keys().map(String::as_str)
    }
}
