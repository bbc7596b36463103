// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room addressing by id or display name.

use std::fmt;

/// A room addressed either by its numeric controller id or by its
/// display name.
///
/// Name matching is exact and case-sensitive; the controller itself
/// allows duplicate names, in which case the first room in controller
/// order wins.
///
/// # Examples
///
/// ```
/// use wiserhub::types::RoomRef;
///
/// let by_id: RoomRef = 3.into();
/// let by_name: RoomRef = "Living Room".into();
///
/// assert_eq!(by_id.to_string(), "room #3");
/// assert_eq!(by_name.to_string(), "\"Living Room\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomRef {
    /// The controller-assigned numeric room id.
    Id(i64),
    /// The room's display name.
    Name(String),
}

impl From<i64> for RoomRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RoomRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RoomRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for RoomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "room #{id}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_id_and_name() {
        assert_eq!(RoomRef::from(7), RoomRef::Id(7));
        assert_eq!(RoomRef::from("Kitchen"), RoomRef::Name("Kitchen".to_string()));
        assert_eq!(
            RoomRef::from(String::from("Kitchen")),
            RoomRef::Name("Kitchen".to_string())
        );
    }

    #[test]
    fn display_distinguishes_forms() {
        assert_eq!(RoomRef::Id(2).to_string(), "room #2");
        assert_eq!(RoomRef::Name("Hall".to_string()).to_string(), "\"Hall\"");
    }
}
