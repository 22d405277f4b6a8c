// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status code interpretation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Interpreted status of a cloud API call.
///
/// The API reports failures at two levels: the HTTP status of the request,
/// and a `statusCode` inside the JSON body. Both are mapped onto this enum.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::response::ApiStatus;
///
/// assert_eq!(ApiStatus::from_code(161), ApiStatus::DeviceOffline);
/// assert!(ApiStatus::from_code(100).is_success());
/// assert_eq!(ApiStatus::from_code(999), ApiStatus::Unknown(999));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiStatus {
    /// 100: command accepted.
    Success,
    /// 151: the device type does not support the command.
    DeviceTypeError,
    /// 152: the device id is unknown.
    DeviceNotFound,
    /// 160: the command is not supported.
    CommandNotSupported,
    /// 161: the device is offline.
    DeviceOffline,
    /// 171: the hub relaying infrared commands is offline.
    HubOffline,
    /// 190: device state out of sync with the server, or malformed command.
    DeviceInternalError,
    /// HTTP 200 without a body-level status.
    RequestOk,
    /// HTTP 400.
    BadRequest,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404.
    NotFound,
    /// HTTP 406.
    NotAcceptable,
    /// HTTP 415.
    UnsupportedMediaType,
    /// HTTP 422.
    UnprocessableEntity,
    /// HTTP 429.
    TooManyRequests,
    /// HTTP 500.
    InternalServerError,
    /// Any other code.
    Unknown(u16),
}

impl ApiStatus {
    /// Maps a numeric status code.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            100 => Self::Success,
            151 => Self::DeviceTypeError,
            152 => Self::DeviceNotFound,
            160 => Self::CommandNotSupported,
            161 => Self::DeviceOffline,
            171 => Self::HubOffline,
            190 => Self::DeviceInternalError,
            200 => Self::RequestOk,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            406 => Self::NotAcceptable,
            415 => Self::UnsupportedMediaType,
            422 => Self::UnprocessableEntity,
            429 => Self::TooManyRequests,
            500 => Self::InternalServerError,
            other => Self::Unknown(other),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Success => 100,
            Self::DeviceTypeError => 151,
            Self::DeviceNotFound => 152,
            Self::CommandNotSupported => 160,
            Self::DeviceOffline => 161,
            Self::HubOffline => 171,
            Self::DeviceInternalError => 190,
            Self::RequestOk => 200,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::NotAcceptable => 406,
            Self::UnsupportedMediaType => 415,
            Self::UnprocessableEntity => 422,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
            Self::Unknown(code) => *code,
        }
    }

    /// Returns `true` only for an accepted command.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns a human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Success => "command successfully sent",
            Self::DeviceTypeError => "command not supported by this device type",
            Self::DeviceNotFound => "device not found",
            Self::CommandNotSupported => "command is not supported",
            Self::DeviceOffline => "device is offline",
            Self::HubOffline => "hub device is offline",
            Self::DeviceInternalError => {
                "device internal error: state not synchronized with server, or invalid command format"
            }
            Self::RequestOk => "request successful",
            Self::BadRequest => "bad request, invalid payload",
            Self::Unauthorized => "unauthorized, the request has not been authenticated",
            Self::Forbidden => "forbidden, missing permissions or resource not found",
            Self::NotFound => "requested path does not exist",
            Self::NotAcceptable => "requested MIME type is not supported",
            Self::UnsupportedMediaType => "content type is not supported",
            Self::UnprocessableEntity => "payload has invalid values",
            Self::TooManyRequests => "too many requests, daily limit exceeded",
            Self::InternalServerError => "internal server error",
            Self::Unknown(_) => "unknown status code",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}
