// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller write commands.
//!
//! This module translates room-mode and system-mode intents into the
//! JSON PATCH bodies the controller expects. Construction is pure; the
//! hub issues the writes.
//!
//! # Room modes
//!
//! | Mode | Pre-step | Primary write |
//! |------|----------|---------------|
//! | manual | `Mode=Manual` | override `Type=Manual`, set point at least the schedule |
//! | set | — | override `Type=Manual`, explicit set point |
//! | boost | — | override `Type=Manual` with a duration |
//! | off | `Mode=Manual` | override to the off sentinel (-20 °C) |
//! | auto | — | `Mode=Auto` |
//!
//! Every mode except `boost` is preceded by an override-cancellation
//! write so a previously active timed boost does not linger.
//!
//! # Examples
//!
//! ```
//! use wiserhub::command::RoomModeSettings;
//! use wiserhub::types::RoomMode;
//!
//! let settings = RoomModeSettings::new("Office", RoomMode::Boost)
//!     .with_boost_temp(19.5)
//!     .with_boost_duration(60);
//! ```

mod room_mode;
mod system_mode;

pub use room_mode::{DEFAULT_BOOST_DURATION_MINUTES, RoomModeOutcome, RoomModeSettings};

pub(crate) use room_mode::build_patches;
pub(crate) use system_mode::build_system_override;
