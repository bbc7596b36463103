// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller-wide operating modes.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The overall operating mode of the controller.
///
/// The numeric values are the controller's own wire encoding and are a
/// fixed contract: gaps in the sequence belong to modes the controller
/// reserves but does not expose.
///
/// # Examples
///
/// ```
/// use wiserhub::types::SystemMode;
///
/// assert_eq!(SystemMode::Away.wire_value(), 2);
/// assert_eq!("cancel_all_overrides".parse::<SystemMode>().unwrap(),
///            SystemMode::CancelAllOverrides);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemMode {
    /// Regular scheduled operation.
    Normal,
    /// Away mode: all rooms held at the away set point.
    Away,
    /// Boost every room at once.
    BoostAllRooms,
    /// Cancel every active override and return rooms to schedule.
    CancelAllOverrides,
}

impl SystemMode {
    /// Returns the canonical mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Away => "away",
            Self::BoostAllRooms => "boost_all_rooms",
            Self::CancelAllOverrides => "cancel_all_overrides",
        }
    }

    /// Returns the numeric value the controller expects.
    #[must_use]
    pub const fn wire_value(&self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Away => 2,
            Self::BoostAllRooms => 4,
            Self::CancelAllOverrides => 5,
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SystemMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept snake_case, kebab-case and camelCase spellings alike.
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "normal" => Ok(Self::Normal),
            "away" => Ok(Self::Away),
            "boostallrooms" => Ok(Self::BoostAllRooms),
            // Historical config spelling of the boost-all override.
            "bootallrooms" => Ok(Self::BoostAllRooms),
            "cancelalloverrides" => Ok(Self::CancelAllOverrides),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_controller_contract() {
        assert_eq!(SystemMode::Normal.wire_value(), 0);
        assert_eq!(SystemMode::Away.wire_value(), 2);
        assert_eq!(SystemMode::BoostAllRooms.wire_value(), 4);
        assert_eq!(SystemMode::CancelAllOverrides.wire_value(), 5);
    }

    #[test]
    fn parses_spelling_variants() {
        assert_eq!("normal".parse::<SystemMode>().unwrap(), SystemMode::Normal);
        assert_eq!("AWAY".parse::<SystemMode>().unwrap(), SystemMode::Away);
        assert_eq!(
            "boostAllRooms".parse::<SystemMode>().unwrap(),
            SystemMode::BoostAllRooms
        );
        assert_eq!(
            "boost-all-rooms".parse::<SystemMode>().unwrap(),
            SystemMode::BoostAllRooms
        );
        // The spelling older configuration files carry.
        assert_eq!(
            "bootAllRooms".parse::<SystemMode>().unwrap(),
            SystemMode::BoostAllRooms
        );
        assert_eq!(
            "cancel_all_overrides".parse::<SystemMode>().unwrap(),
            SystemMode::CancelAllOverrides
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = "party".parse::<SystemMode>();
        assert!(matches!(result, Err(Error::InvalidMode(name)) if name == "party"));
    }
}
