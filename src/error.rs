// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `wiserhub` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! configuration validation, transport-level HTTP errors, JSON parsing, and
//! the domain-level command failures (unknown rooms, unknown modes, rejected
//! writes).

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking to
/// a Wiser heat hub.
#[derive(Debug, Error)]
pub enum Error {
    /// The hub configuration is invalid or incomplete.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Communication with the controller failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A controller response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A service was addressed by a name the controller does not expose.
    #[error("unknown controller service: {0:?}")]
    InvalidService(String),

    /// A room identifier did not resolve against the current snapshot.
    #[error("room not found: {0:?}")]
    InvalidRoom(String),

    /// A mode string did not match any supported room or system mode.
    #[error("invalid mode: {0:?}")]
    InvalidMode(String),

    /// The full-snapshot fetch that precedes a write operation failed.
    #[error("full snapshot fetch failed: {0}")]
    FullFetchFailed(#[source] Box<Error>),

    /// One or more controller writes were rejected.
    #[error("controller write failed: {0}")]
    WriteFailed(#[source] Box<Error>),
}

impl Error {
    /// Wraps an error from the snapshot fetch that precedes a write.
    pub(crate) fn full_fetch(source: Error) -> Self {
        Self::FullFetchFailed(Box::new(source))
    }

    /// Wraps an error from a rejected controller write.
    pub(crate) fn write_failed(source: Error) -> Self {
        Self::WriteFailed(Box::new(source))
    }
}

/// Errors raised while validating a [`HubConfig`](crate::HubConfig).
///
/// These are hard setup failures: they are reported synchronously when the
/// hub is constructed and never deferred to request time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No controller address was supplied.
    #[error("controller address (ip) is required")]
    MissingIp,

    /// No controller secret was supplied.
    #[error("controller secret is required")]
    MissingSecret,

    /// The secret cannot be carried in an HTTP header.
    #[error("controller secret contains characters not allowed in an HTTP header")]
    InvalidSecret,

    /// A boost-cancel time string did not parse as 24h `HH:mm`.
    #[error("invalid boost cancel time {value:?}: expected 24h HH:mm")]
    InvalidBoostCancelTime {
        /// The string that failed to parse.
        value: String,
    },
}

/// Errors related to HTTP communication with the controller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response body not read.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The controller answered with a non-success status.
    #[error("controller returned HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, as returned by the controller.
        body: String,
    },
}

/// Errors related to parsing controller responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response parsed as JSON but had an unusable shape.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::MissingIp.to_string(),
            "controller address (ip) is required"
        );
        let err = ConfigError::InvalidBoostCancelTime {
            value: "25:99".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid boost cancel time \"25:99\": expected 24h HH:mm"
        );
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::MissingSecret.into();
        assert!(matches!(err, Error::Config(ConfigError::MissingSecret)));
    }

    #[test]
    fn transport_status_display() {
        let err = TransportError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "controller returned HTTP 404: Not Found");
    }

    #[test]
    fn wrapped_write_failure_preserves_source() {
        let inner: Error = TransportError::Status {
            status: 500,
            body: String::new(),
        }
        .into();
        let err = Error::write_failed(inner);
        assert!(matches!(err, Error::WriteFailed(_)));
        assert!(err.to_string().starts_with("controller write failed"));
    }

    #[test]
    fn invalid_room_display() {
        let err = Error::InvalidRoom("Attic".to_string());
        assert_eq!(err.to_string(), "room not found: \"Attic\"");
    }
}
