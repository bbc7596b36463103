// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System-mode override payloads.

use serde_json::{Value, json};

use crate::types::SystemMode;

/// Builds the PATCH body that puts the controller into `mode`.
///
/// System modes travel as a numeric `RequestOverride` on the System
/// document.
#[must_use]
pub(crate) fn build_system_override(mode: SystemMode) -> Value {
    json!({
        "RequestOverride": {"Type": mode.wire_value()}
    })
}
