// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for cloud API responses.
//!
//! A command response looks like:
//!
//! ```json
//! {"statusCode": 100, "body": {}, "message": "success"}
//! ```
//!
//! A command only counts as accepted when the HTTP status is 200 **and** the
//! body-level `statusCode` is 100.

mod status;

use serde::Deserialize;

pub use status::ApiStatus;

/// HTTP status the API uses for a completed request.
pub const HTTP_OK: u16 = 200;

/// Body of an API response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBody {
    status_code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    body: serde_json::Value,
}

/// Response of the "push changes" call.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::response::{ApiResponse, ApiStatus};
///
/// let ok = ApiResponse::from_http(200, r#"{"statusCode":100,"body":{},"message":"success"}"#);
/// assert!(ok.is_success());
///
/// let offline = ApiResponse::from_http(200, r#"{"statusCode":161,"message":"device offline"}"#);
/// assert_eq!(offline.status(), ApiStatus::DeviceOffline);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    http_status: u16,
    status_code: Option<u16>,
    message: String,
    body: serde_json::Value,
}

impl ApiResponse {
    /// Creates a response from already-parsed parts.
    #[must_use]
    pub fn new(http_status: u16, status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            http_status,
            status_code,
            message: message.into(),
            body: serde_json::Value::Null,
        }
    }

    /// Creates an accepted response.
    #[must_use]
    pub fn success() -> Self {
        Self::new(HTTP_OK, Some(ApiStatus::Success.code()), "success")
    }

    /// Builds a response from an HTTP status and raw body.
    ///
    /// A body that is not the expected JSON is kept verbatim as the message
    /// and has no body-level status.
    #[must_use]
    pub fn from_http(http_status: u16, text: &str) -> Self {
        match serde_json::from_str::<ApiBody>(text) {
            Ok(parsed) => Self {
                http_status,
                status_code: Some(parsed.status_code),
                message: parsed.message,
                body: parsed.body,
            },
            Err(e) => {
                tracing::debug!(error = %e, "Response body is not an API envelope");
                Self::new(http_status, None, text)
            }
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Returns the body-level status code, if the body had one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns the message reported by the API.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `body` field of the response.
    #[must_use]
    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// Returns `true` if the command was accepted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.http_status == HTTP_OK && self.status_code == Some(ApiStatus::Success.code())
    }

    /// Interprets the response.
    ///
    /// An HTTP failure takes precedence over the body-level status.
    #[must_use]
    pub fn status(&self) -> ApiStatus {
        if self.http_status != HTTP_OK {
            return ApiStatus::from_code(self.http_status);
        }
        match self.status_code {
            Some(code) => ApiStatus::from_code(code),
            None => ApiStatus::RequestOk,
        }
    }
}
