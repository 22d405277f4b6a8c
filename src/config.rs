// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device configuration.
//!
//! A [`DeviceConfig`] can be built in code or deserialized from the JSON block
//! a bridge keeps for each device:
//!
//! ```json
//! {
//!   "deviceId": "02-202212011200-12345678",
//!   "configDeviceName": "Bedroom Light",
//!   "connectionType": "OpenAPI",
//!   "stateless": false,
//!   "disablePushOn": false,
//!   "disablePushOff": false,
//!   "customize": false,
//!   "debounceMs": 1000
//! }
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::{CommandSet, PresetCommands};
use crate::error::ConfigError;

const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Default quiet period before a brightness change is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// How the bridge reaches the device.
///
/// Only [`OpenApi`](Self::OpenApi) sends commands; the other modes make every
/// dispatch a logged no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectionMode {
    /// Through the vendor cloud API.
    #[default]
    #[serde(rename = "OpenAPI")]
    OpenApi,
    /// Bluetooth only; infrared devices cannot be reached this way.
    #[serde(rename = "BLE")]
    Ble,
    /// The device is configured but not connected.
    Disabled,
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenApi => f.write_str("OpenAPI"),
            Self::Ble => f.write_str("BLE"),
            Self::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Configuration of one infrared light.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use switchbot_ir_light::config::{ConnectionMode, DeviceConfig};
///
/// let config = DeviceConfig::new("02-ABC")
///     .with_name("Bedroom Light")
///     .with_push_off_disabled(true);
/// assert_eq!(config.display_name(), "Bedroom Light");
/// assert_eq!(config.connection, ConnectionMode::OpenApi);
/// assert_eq!(config.debounce(), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
// Each flag is an independent operator switch from the bridge config.
#[allow(clippy::struct_excessive_bools)]
pub struct DeviceConfig {
    /// Cloud id of the device.
    pub device_id: String,
    /// Name shown in the home-automation UI.
    #[serde(default, rename = "configDeviceName")]
    pub name: Option<String>,
    /// How the device is reached.
    #[serde(default, rename = "connectionType")]
    pub connection: ConnectionMode,
    /// Expose the device as two momentary triggers instead of a light.
    #[serde(default)]
    pub stateless: bool,
    /// Never send "turn on".
    #[serde(default)]
    pub disable_push_on: bool,
    /// Never send "turn off".
    #[serde(default)]
    pub disable_push_off: bool,
    /// Use learned buttons for on/off.
    #[serde(default)]
    pub customize: bool,
    /// Learned button for "on".
    #[serde(default)]
    pub custom_on: Option<String>,
    /// Learned button for "off".
    #[serde(default)]
    pub custom_off: Option<String>,
    /// Learned buttons for the brightness presets.
    #[serde(default)]
    pub presets: PresetCommands,
    /// Quiet period for brightness changes, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl DeviceConfig {
    /// Creates a dimmable-light configuration with defaults.
    #[must_use]
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: None,
            connection: ConnectionMode::default(),
            stateless: false,
            disable_push_on: false,
            disable_push_off: false,
            customize: false,
            custom_on: None,
            custom_off: None,
            presets: PresetCommands::default(),
            debounce_ms: default_debounce_ms(),
        }
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for malformed JSON or unknown values,
    /// and `ConfigError::MissingDeviceId` if the device id is empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the connection mode.
    #[must_use]
    pub fn with_connection(mut self, connection: ConnectionMode) -> Self {
        self.connection = connection;
        self
    }

    /// Selects stateless (two-trigger) mode.
    #[must_use]
    pub fn with_stateless(mut self, stateless: bool) -> Self {
        self.stateless = stateless;
        self
    }

    /// Disables outbound "turn on" calls.
    #[must_use]
    pub fn with_push_on_disabled(mut self, disabled: bool) -> Self {
        self.disable_push_on = disabled;
        self
    }

    /// Disables outbound "turn off" calls.
    #[must_use]
    pub fn with_push_off_disabled(mut self, disabled: bool) -> Self {
        self.disable_push_off = disabled;
        self
    }

    /// Uses learned buttons for on/off.
    #[must_use]
    pub fn with_custom_commands(mut self, on: Option<String>, off: Option<String>) -> Self {
        self.customize = true;
        self.custom_on = on;
        self.custom_off = off;
        self
    }

    /// Sets the preset button names.
    #[must_use]
    pub fn with_presets(mut self, presets: PresetCommands) -> Self {
        self.presets = presets;
        self
    }

    /// Sets the brightness quiet period.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDeviceId` if the device id is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_id.trim().is_empty() {
            return Err(ConfigError::MissingDeviceId);
        }
        Ok(())
    }

    /// Returns the name if set, otherwise the device id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.device_id)
    }

    /// Returns the brightness quiet period.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Returns `true` if dispatches reach the cloud API.
    #[must_use]
    pub fn is_cloud(&self) -> bool {
        self.connection == ConnectionMode::OpenApi
    }

    /// Returns the device-specific command identifiers.
    #[must_use]
    pub fn command_set(&self) -> CommandSet {
        let commands = if self.customize {
            CommandSet::customized(self.custom_on.clone(), self.custom_off.clone())
        } else {
            CommandSet::standard()
        };
        commands.with_presets(self.presets.clone())
    }
}

/// Account credentials for the cloud API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// API token.
    pub token: String,
    /// API secret used for request signing.
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Checks that both values are present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredentials` naming the blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("token".to_string()));
        }
        if self.secret.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("secret".to_string()));
        }
        Ok(())
    }

    /// Converts the credentials into a cloud client configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredentials` if a value is blank.
    #[cfg(feature = "http")]
    pub fn into_cloud_config(self) -> Result<crate::protocol::CloudConfig, ConfigError> {
        self.validate()?;
        Ok(crate::protocol::CloudConfig::new(self.token, self.secret))
    }
}
