// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the controller's local REST API.

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::HubConfig;
use crate::error::{ConfigError, ParseError, Result, TransportError};
use crate::protocol::Service;
use crate::state::Snapshot;

/// Name of the header carrying the controller secret.
const SECRET_HEADER: &str = "SECRET";

/// HTTP client for a single heat hub.
///
/// The secret is installed as a default header so every request carries
/// it; the per-request timeout comes from the configuration. The client
/// is cheap to clone and safe to share across tasks.
///
/// # Examples
///
/// ```no_run
/// use wiserhub::{HubConfig, protocol::{HubClient, Service}};
///
/// # async fn example() -> wiserhub::Result<()> {
/// let client = HubClient::new(&HubConfig::new("192.168.1.42", "A1B2C3D4E5"))?;
/// let rooms = client.get(Service::Rooms).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HubClient {
    base_url: String,
    client: Client,
}

impl HubClient {
    /// Creates a client for the controller described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] kind when the configuration fails
    /// validation, or a transport error if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &HubConfig) -> Result<Self> {
        config.validate()?;

        let mut secret =
            HeaderValue::from_str(&config.secret).map_err(|_| ConfigError::InvalidSecret)?;
        secret.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(SECRET_HEADER, secret);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(TransportError::Request)?;

        Ok(Self {
            base_url: config.base_url(),
            client,
        })
    }

    /// Returns the base URL of the controller.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetches a service document.
    ///
    /// # Errors
    ///
    /// Returns a transport error on network failure or a non-2xx status,
    /// and a parse error when the body is not JSON.
    pub async fn get(&self, service: Service) -> Result<Value> {
        self.get_path(service.as_path()).await
    }

    /// Fetches an arbitrary controller path.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn get_path(&self, path: &str) -> Result<Value> {
        let url = self.url(path);

        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TransportError::Request)?;

        Self::decode(response).await
    }

    /// Sends a PATCH with a JSON body to a service document.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn patch(&self, service: Service, body: &Value) -> Result<Value> {
        self.patch_path(service.as_path(), body).await
    }

    /// Sends a PATCH with a JSON body to an arbitrary controller path.
    ///
    /// Per-room writes go through here, addressed as
    /// `/data/domain/Room/{id}`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn patch_path(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);

        tracing::debug!(url = %url, body = %body, "PATCH");

        let response = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Request)?;

        Self::decode(response).await
    }

    /// Fetches the full domain dump and parses it into a [`Snapshot`].
    ///
    /// # Errors
    ///
    /// Returns a transport error on request failure, or a parse error
    /// when the dump is not a JSON object of entity types.
    pub async fn fetch_full(&self) -> Result<Snapshot> {
        let value = self.get(Service::Full).await?;
        Ok(Snapshot::from_value(value)?)
    }

    /// Fetches the controller's brand name as a connectivity check.
    ///
    /// A reachable hub answers with its brand string (`"WiserHeat"`).
    ///
    /// # Errors
    ///
    /// Returns a transport error when the hub is unreachable or a parse
    /// error when the endpoint does not answer with a string.
    pub async fn probe(&self) -> Result<String> {
        let value = self.get(Service::BrandName).await?;
        match value.as_str() {
            Some(brand) => Ok(brand.to_string()),
            None => Err(ParseError::UnexpectedShape(format!(
                "brand name endpoint answered with {value}"
            ))
            .into()),
        }
    }

    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await.map_err(TransportError::Request)?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        tracing::debug!(body = %body, "controller response");

        // Writes are acknowledged with an empty body.
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body).map_err(ParseError::Json)?)
    }
}
