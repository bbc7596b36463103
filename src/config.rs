// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection configuration for a Wiser heat hub.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;
use reqwest::header::HeaderValue;

use crate::error::ConfigError;

/// Default poll interval for monitors.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Default timeout for a single HTTP request to the controller.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default boost set point and boost ceiling, in degrees Celsius.
pub const DEFAULT_BOOST_TEMP: f64 = 20.0;

/// Configuration for a single heat hub connection.
///
/// Only the controller address and secret are required; everything else
/// has a sensible default. The secret is obtained from the hub itself
/// (push the setup button and query `/secret/` within a couple of
/// minutes) and is sent on every request.
///
/// # Examples
///
/// ```
/// use wiserhub::HubConfig;
///
/// let config = HubConfig::new("192.168.1.42", "A1B2C3D4E5")
///     .with_interval_secs(30)
///     .with_max_boost(22.0);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.base_url(), "http://192.168.1.42");
/// ```
#[derive(Clone)]
pub struct HubConfig {
    /// The controller's IP address or hostname.
    pub ip: String,
    /// The controller's secret token, sent as the `SECRET` header.
    pub secret: String,
    /// Poll interval between monitor ticks.
    pub interval: Duration,
    /// Ceiling for boost/override set points, in degrees Celsius.
    ///
    /// Values above 30 are treated as 30 when clamping.
    pub max_boost: f64,
    /// Optional 24h `HH:mm` wall-clock time at which timed boosts
    /// should be cancelled by an external scheduler.
    pub boost_cancel_time: Option<String>,
    /// Optional directory for artifacts written by callers (snapshot
    /// dumps and the like). Unused by the library itself.
    pub folder: Option<PathBuf>,
    /// Timeout for a single HTTP request.
    pub timeout: Duration,
}

impl HubConfig {
    /// Creates a configuration for the controller at `ip` using `secret`.
    #[must_use]
    pub fn new(ip: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            secret: secret.into(),
            interval: DEFAULT_INTERVAL,
            max_boost: DEFAULT_BOOST_TEMP,
            boost_cancel_time: None,
            folder: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the poll interval between monitor ticks.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the poll interval in whole seconds.
    #[must_use]
    pub fn with_interval_secs(mut self, secs: u64) -> Self {
        self.interval = Duration::from_secs(secs);
        self
    }

    /// Sets the per-request HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the boost ceiling in degrees Celsius.
    ///
    /// The absolute maximum the controller accepts is 30 °C; a higher
    /// ceiling is cut to 30.
    #[must_use]
    pub fn with_max_boost(mut self, max_boost: f64) -> Self {
        self.max_boost = max_boost.min(30.0);
        self
    }

    /// Sets the boost cancel time as a 24h `HH:mm` string.
    #[must_use]
    pub fn with_boost_cancel_time(mut self, time: impl Into<String>) -> Self {
        self.boost_cancel_time = Some(time.into());
        self
    }

    /// Sets the artifact directory.
    #[must_use]
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Checks the configuration for hard setup failures.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the address or secret is missing,
    /// the secret cannot be carried in an HTTP header, or the boost
    /// cancel time does not parse as 24h `HH:mm`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ip.trim().is_empty() {
            return Err(ConfigError::MissingIp);
        }
        if self.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if HeaderValue::from_str(&self.secret).is_err() {
            return Err(ConfigError::InvalidSecret);
        }
        if let Some(time) = &self.boost_cancel_time
            && NaiveTime::parse_from_str(time, "%H:%M").is_err()
        {
            return Err(ConfigError::InvalidBoostCancelTime {
                value: time.clone(),
            });
        }
        Ok(())
    }

    /// Returns the base URL for controller requests.
    ///
    /// A bare address becomes `http://{ip}`; an address that already
    /// carries a scheme is used as-is.
    #[must_use]
    pub fn base_url(&self) -> String {
        let ip = self.ip.trim().trim_end_matches('/');
        if ip.starts_with("http://") || ip.starts_with("https://") {
            ip.to_string()
        } else {
            format!("http://{ip}")
        }
    }

    /// Returns the parsed boost cancel time, if one is configured and valid.
    #[must_use]
    pub fn boost_cancel_at(&self) -> Option<NaiveTime> {
        self.boost_cancel_time
            .as_deref()
            .and_then(|time| NaiveTime::parse_from_str(time, "%H:%M").ok())
    }
}

// The secret grants full control of the heating system; keep it out of
// logs even when the whole config is formatted with `{:?}`.
impl fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubConfig")
            .field("ip", &self.ip)
            .field("secret", &"<redacted>")
            .field("interval", &self.interval)
            .field("max_boost", &self.max_boost)
            .field("boost_cancel_time", &self.boost_cancel_time)
            .field("folder", &self.folder)
            .field("timeout", &self.timeout)
            .finish()
    }
}
