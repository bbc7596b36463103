// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller protocol: named service paths and the HTTP client.
//!
//! The heat hub exposes a local REST API rooted at `/data/`. Reads are
//! plain `GET`s, writes are `PATCH`es with a JSON body, and every request
//! carries the controller secret in a `SECRET` header.
//!
//! # Layout
//!
//! - [`Service`] names every endpoint the controller exposes
//! - [`HubClient`] executes `GET`/`PATCH` requests against them

mod http;

pub use http::HubClient;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A named controller endpoint.
///
/// The paths are string constants: they are a stable contract with the
/// physical controller, not something discovered at runtime.
///
/// # Examples
///
/// ```
/// use wiserhub::protocol::Service;
///
/// assert_eq!(Service::Rooms.as_path(), "/data/domain/Room/");
/// assert_eq!("rooms".parse::<Service>().unwrap(), Service::Rooms);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// The controller's network information, including its IP address.
    Network,
    /// The controller's current WiFi signal strength.
    WifiRssi,
    /// The full domain dump: every entity type in one document.
    Full,
    /// The brand-name probe, used as a cheap connectivity check.
    BrandName,
    /// All paired devices.
    Devices,
    /// Heating channels.
    Heating,
    /// All rooms.
    Rooms,
    /// Room thermostats.
    RoomStats,
    /// Stored schedules.
    Schedules,
    /// Controller-wide system state.
    System,
    /// Thermostatic radiator valves.
    SmartValves,
}

impl Service {
    /// Returns the literal controller path for this service.
    #[must_use]
    pub const fn as_path(&self) -> &'static str {
        match self {
            Self::Network => "/data/network/",
            Self::WifiRssi => "/data/network/Station/RSSI/",
            Self::Full => "/data/domain/",
            Self::BrandName => "/data/domain/System/BrandName/",
            Self::Devices => "/data/domain/Device/",
            Self::Heating => "/data/domain/HeatingChannel/",
            Self::Rooms => "/data/domain/Room/",
            Self::RoomStats => "/data/domain/RoomStat/",
            Self::Schedules => "/data/domain/Schedule/",
            Self::System => "/data/domain/System/",
            Self::SmartValves => "/data/domain/SmartValve/",
        }
    }

    /// Returns the canonical service name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::WifiRssi => "wifi_rssi",
            Self::Full => "full",
            Self::BrandName => "brand_name",
            Self::Devices => "devices",
            Self::Heating => "heating",
            Self::Rooms => "rooms",
            Self::RoomStats => "room_stats",
            Self::Schedules => "schedules",
            Self::System => "system",
            Self::SmartValves => "smart_valves",
        }
    }

    /// Returns the path of a single item within this service.
    ///
    /// Only meaningful for collection services (`Rooms`, `Devices`, ...).
    #[must_use]
    pub fn item_path(&self, id: i64) -> String {
        format!("{}{id}", self.as_path())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept snake_case, kebab-case and camelCase spellings alike.
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "network" => Ok(Self::Network),
            "wifirssi" => Ok(Self::WifiRssi),
            "full" => Ok(Self::Full),
            "brandname" => Ok(Self::BrandName),
            "devices" => Ok(Self::Devices),
            "heating" => Ok(Self::Heating),
            "rooms" => Ok(Self::Rooms),
            "roomstats" => Ok(Self::RoomStats),
            "schedules" => Ok(Self::Schedules),
            "system" => Ok(Self::System),
            // "trvs" is what installers call the smart valves.
            "smartvalves" | "trvs" => Ok(Self::SmartValves),
            _ => Err(Error::InvalidService(s.to_string())),
        }
    }
}
