// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Wiser controller commands.
//!
//! This module provides type-safe representations of the values exchanged
//! with the controller, including the tenths-of-a-degree temperature wire
//! format and the fixed mode enumerations.
//!
//! # Types
//!
//! - [`Temperature`] - degrees Celsius with wire conversion and clamping
//! - [`RoomMode`] - per-room operating mode (manual/set/boost/off/auto)
//! - [`SystemMode`] - controller-wide operating mode
//! - [`RoomRef`] - room addressed by numeric id or display name

mod room_mode;
mod room_ref;
mod system_mode;
mod temperature;

pub use room_mode::RoomMode;
pub use room_ref::RoomRef;
pub use system_mode::SystemMode;
pub use temperature::Temperature;
