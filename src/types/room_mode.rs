// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room operating modes.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The requested operating mode for a single room.
///
/// Mode names parse case-insensitively, matching what a CLI or config
/// file would hand over.
///
/// # Examples
///
/// ```
/// use wiserhub::types::RoomMode;
///
/// assert_eq!("BOOST".parse::<RoomMode>().unwrap(), RoomMode::Boost);
/// assert_eq!(RoomMode::Auto.as_str(), "auto");
/// assert!("defrost".parse::<RoomMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomMode {
    /// Permanent manual override, keeping at least the scheduled set point.
    Manual,
    /// Permanent override to an explicit set point.
    Set,
    /// Timed override that expires after a duration.
    Boost,
    /// Heating off for this room (set point forced to the off sentinel).
    Off,
    /// Return the room to its schedule and clear any override.
    Auto,
}

impl RoomMode {
    /// Returns the canonical lowercase mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Set => "set",
            Self::Boost => "boost",
            Self::Off => "off",
            Self::Auto => "auto",
        }
    }

    /// Returns true if this mode carries a timed override.
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        matches!(self, Self::Boost)
    }
}

impl fmt::Display for RoomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "set" => Ok(Self::Set),
            "boost" => Ok(Self::Boost),
            "off" => Ok(Self::Off),
            "auto" => Ok(Self::Auto),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}
