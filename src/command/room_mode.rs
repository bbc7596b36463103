// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room-mode override requests and their controller payloads.

use serde_json::{Value, json};

use crate::config::DEFAULT_BOOST_TEMP;
use crate::state::Room;
use crate::types::{RoomMode, RoomRef, Temperature};

/// Default boost duration in minutes.
pub const DEFAULT_BOOST_DURATION_MINUTES: u32 = 30;

/// The originator tag the controller expects on override writes.
const ORIGINATOR: &str = "App";

/// Settings for one room-mode request.
///
/// # Examples
///
/// ```
/// use wiserhub::command::RoomModeSettings;
/// use wiserhub::types::RoomMode;
///
/// let settings = RoomModeSettings::new("Office", RoomMode::Boost)
///     .with_boost_temp(19.5)
///     .with_boost_duration(60);
///
/// assert_eq!(settings.boost_temp, 19.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoomModeSettings {
    /// The room to change, by id or name.
    pub room: RoomRef,
    /// The requested mode.
    pub mode: RoomMode,
    /// Target temperature in °C for manual/set/boost (default 20).
    pub boost_temp: f64,
    /// Boost duration in minutes (default 30), used by boost only.
    pub boost_duration: u32,
}

impl RoomModeSettings {
    /// Creates settings with the default boost temperature and duration.
    #[must_use]
    pub fn new(room: impl Into<RoomRef>, mode: RoomMode) -> Self {
        Self {
            room: room.into(),
            mode,
            boost_temp: DEFAULT_BOOST_TEMP,
            boost_duration: DEFAULT_BOOST_DURATION_MINUTES,
        }
    }

    /// Sets the target temperature in °C.
    #[must_use]
    pub fn with_boost_temp(mut self, boost_temp: f64) -> Self {
        self.boost_temp = boost_temp;
        self
    }

    /// Sets the boost duration in minutes.
    #[must_use]
    pub fn with_boost_duration(mut self, minutes: u32) -> Self {
        self.boost_duration = minutes;
        self
    }
}

/// The writes one room-mode request translates to, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PatchPlan {
    /// The room the writes target.
    pub room_id: i64,
    /// Its display name, for the outcome and diagnostics.
    pub room_name: String,
    /// PATCH bodies in submission order; the last is the primary write.
    pub bodies: Vec<Value>,
    /// The effective set point after clamping, where the mode has one.
    pub set_point: Option<Temperature>,
}

/// Translates a room-mode request into its ordered controller writes.
///
/// For every mode except `boost`, an override-cancellation write leads
/// the sequence so a previously active timed boost does not linger.
/// `manual` and `off` insert a `Mode=Manual` write before their
/// override. The primary write always comes last.
pub(crate) fn build_patches(
    room: &Room,
    mode: RoomMode,
    boost_temp: f64,
    boost_duration: u32,
    max_boost: f64,
) -> PatchPlan {
    let requested = Temperature::celsius(boost_temp);
    let clamped = requested.clamped(max_boost);
    if clamped != requested {
        tracing::debug!(
            requested = %requested,
            effective = %clamped,
            "set point clamped"
        );
    }

    let mut bodies = Vec::new();

    if mode != RoomMode::Boost {
        bodies.push(json!({
            "RequestOverride": {
                "Type": "None",
                "DurationMinutes": 0,
                "SetPoint": 0,
                "Originator": ORIGINATOR,
            }
        }));
    }

    let set_point = match mode {
        RoomMode::Manual => {
            bodies.push(json!({"Mode": "Manual"}));
            // Hold at least the scheduled set point, never below it.
            let wire = clamped.to_wire();
            let wire = room.scheduled_set_point.map_or(wire, |s| wire.max(s));
            bodies.push(json!({
                "RequestOverride": {"Type": "Manual", "SetPoint": wire}
            }));
            Some(Temperature::from_wire(wire))
        }
        RoomMode::Set => {
            bodies.push(json!({
                "RequestOverride": {"Type": "Manual", "SetPoint": clamped.to_wire()}
            }));
            Some(clamped)
        }
        RoomMode::Boost => {
            bodies.push(json!({
                "RequestOverride": {
                    "Type": "Manual",
                    "DurationMinutes": boost_duration,
                    "SetPoint": clamped.to_wire(),
                    "Originator": ORIGINATOR,
                }
            }));
            Some(clamped)
        }
        RoomMode::Off => {
            bodies.push(json!({"Mode": "Manual"}));
            bodies.push(json!({
                "RequestOverride": {"Type": "Manual", "SetPoint": Temperature::OFF.to_wire()}
            }));
            Some(Temperature::OFF)
        }
        RoomMode::Auto => {
            bodies.push(json!({"Mode": "Auto"}));
            None
        }
    };

    PatchPlan {
        room_id: room.id,
        room_name: room.name.clone(),
        bodies,
        set_point,
    }
}

/// The result of a room-mode request.
///
/// Reflects the last write in submission order; the earlier writes are
/// best-effort pre-conditioning, not independently meaningful outcomes.
#[derive(Debug, Clone)]
pub struct RoomModeOutcome {
    /// Id of the room that was written to.
    pub room_id: i64,
    /// Display name of that room.
    pub room_name: String,
    /// The mode that was applied.
    pub mode: RoomMode,
    /// The effective set point after clamping, where the mode has one.
    pub set_point: Option<Temperature>,
    /// The controller's response to the primary write.
    pub response: Value,
}
