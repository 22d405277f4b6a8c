// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTPS transport for the cloud device-control API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::command::CommandBody;
use crate::error::ProtocolError;
use crate::protocol::sign::sign;
use crate::protocol::{ApiResponse, Transport};

// ============================================================================
// CloudConfig - Connection parameters for the cloud API
// ============================================================================

/// Configuration for the cloud API client.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::protocol::CloudConfig;
/// use std::time::Duration;
///
/// let config = CloudConfig::new("my-token", "my-secret")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://api.switch-bot.com");
/// ```
#[derive(Clone)]
pub struct CloudConfig {
    token: String,
    secret: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CloudConfig {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.switch-bot.com";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the account token and secret.
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a `CloudClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not an HTTP(S) URL or the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> Result<CloudClient, ProtocolError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }
        if self.token.is_empty() {
            return Err(ProtocolError::ConnectionFailed(
                "API token is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(CloudClient {
            base_url: self.base_url,
            token: self.token,
            secret: self.secret,
            timeout: self.timeout,
            client,
        })
    }
}

// ============================================================================
// CloudClient - Signed HTTPS requests
// ============================================================================

/// Client for the cloud device-control API.
///
/// Every request is signed with the account secret and posted to
/// `/v1.1/devices/{deviceId}/commands`.
///
/// # Examples
///
/// ```no_run
/// use switchbot_ir_light::command::CommandSet;
/// use switchbot_ir_light::command::LightCommand;
/// use switchbot_ir_light::protocol::{CloudConfig, Transport};
///
/// # async fn example() -> switchbot_ir_light::Result<()> {
/// let client = CloudConfig::new("token", "secret").into_client()?;
/// let body = CommandSet::standard().body(LightCommand::TurnOn);
/// let response = client.push_changes("02-ABCDEF", &body, true).await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CloudClient {
    base_url: String,
    token: String,
    secret: String,
    timeout: Duration,
    client: Client,
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CloudClient {
    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the command URL for a device.
    fn command_url(&self, device_id: &str) -> String {
        format!(
            "{}/v1.1/devices/{}/commands",
            self.base_url,
            urlencoding::encode(device_id)
        )
    }

    fn map_error(&self, error: reqwest::Error) -> ProtocolError {
        if error.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if error.is_connect() {
            ProtocolError::ConnectionFailed(error.to_string())
        } else {
            ProtocolError::Http(error)
        }
    }
}

impl Transport for CloudClient {
    async fn push_changes(
        &self,
        device_id: &str,
        body: &CommandBody,
        target_on: bool,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.command_url(device_id);
        let payload = body
            .to_json()
            .map_err(|e| ProtocolError::Encoding(e.to_string()))?;
        let nonce = uuid::Uuid::new_v4().to_string();
        let headers = sign(
            &self.token,
            &self.secret,
            chrono::Utc::now().timestamp_millis(),
            &nonce,
        )?;

        tracing::debug!(url = %url, payload = %payload, target_on, "Sending cloud command");

        let response = self
            .client
            .post(&url)
            .header("Authorization", headers.token)
            .header("sign", headers.sign)
            .header("t", headers.timestamp)
            .header("nonce", headers.nonce)
            .header(CONTENT_TYPE, "application/json; charset=utf8")
            .body(payload)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.map_error(e))?;

        tracing::debug!(status, body = %text, "Received cloud response");

        Ok(ApiResponse::from_http(status, &text))
    }
}
