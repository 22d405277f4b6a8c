// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the accessory adapter.
//!
//! This module provides the error hierarchy for value validation, cloud
//! transport, response parsing and configuration loading.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the cloud API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device configuration is unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The accessory task has stopped.
    #[error("accessory has shut down")]
    ShutDown,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A trigger output state other than 0 or 1 was provided.
    #[error("invalid trigger output state: {0}")]
    InvalidTriggerOutput(u8),

    /// An unknown command type string was provided.
    #[error("invalid command type: {0}")]
    InvalidCommandType(String),
}

/// Errors related to communication with the cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the API failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The request could not be signed with the configured secret.
    #[error("failed to sign request: {0}")]
    Signing(String),

    /// The command payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encoding(String),
}

/// Errors related to JSON encoding and decoding.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to device configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration has no device id.
    #[error("device id is required")]
    MissingDeviceId,

    /// Cloud mode was selected without API credentials.
    #[error("cloud credentials are required: {0}")]
    MissingCredentials(String),

    /// The configuration could not be deserialized.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidTriggerOutput(7);
        let err: Error = value_err.into();
        assert!(matches!(
            err,
            Error::Value(ValueError::InvalidTriggerOutput(7))
        ));
    }

    #[test]
    fn parse_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ParseError::from(json_err);
        assert!(err.to_string().starts_with("JSON parse error: "));
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::MissingDeviceId.to_string(),
            "device id is required"
        );
    }
}
