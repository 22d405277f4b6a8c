// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory event types.

use std::fmt;

use serde::Serialize;

use crate::command::CommandBody;
use crate::response::ApiStatus;
use crate::state::{AccessoryState, StateChange};

/// Why a dispatch was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// Outbound calls in this direction are disabled by configuration.
    PushDisabled,
    /// The connection mode does not reach the cloud API.
    UnsupportedConnection,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushDisabled => f.write_str("push disabled"),
            Self::UnsupportedConnection => f.write_str("unsupported connection"),
        }
    }
}

/// Events emitted by a light accessory.
///
/// Every dispatch ends in exactly one of [`Committed`](Self::Committed),
/// [`TransportFailed`](Self::TransportFailed), [`Rejected`](Self::Rejected)
/// or [`Skipped`](Self::Skipped).
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::event::{AccessoryEvent, SkipReason};
///
/// let event = AccessoryEvent::Skipped {
///     device_id: "02-ABC".to_string(),
///     reason: SkipReason::PushDisabled,
/// };
/// assert!(event.is_outcome());
/// assert_eq!(event.device_id(), "02-ABC");
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessoryEvent {
    /// A command is being sent.
    Dispatched {
        /// The cloud id of the device.
        device_id: String,
        /// The command payload.
        command: CommandBody,
        /// The power state the command targets.
        target_on: bool,
    },

    /// The API accepted a command and the state was committed.
    Committed {
        /// The cloud id of the device.
        device_id: String,
        /// The committed change.
        change: StateChange,
        /// The complete committed state.
        state: AccessoryState,
    },

    /// The call itself failed.
    TransportFailed {
        /// The cloud id of the device.
        device_id: String,
        /// Description of the failure.
        message: String,
    },

    /// The API answered but did not accept the command.
    Rejected {
        /// The cloud id of the device.
        device_id: String,
        /// The interpreted status.
        status: ApiStatus,
        /// The message reported by the API.
        message: String,
    },

    /// Nothing was sent.
    Skipped {
        /// The cloud id of the device.
        device_id: String,
        /// Why nothing was sent.
        reason: SkipReason,
    },
}

impl AccessoryEvent {
    /// Returns the device id associated with this event.
    #[must_use]
    pub fn device_id(&self) -> &str {
        match self {
            Self::Dispatched { device_id, .. }
            | Self::Committed { device_id, .. }
            | Self::TransportFailed { device_id, .. }
            | Self::Rejected { device_id, .. }
            | Self::Skipped { device_id, .. } => device_id,
        }
    }

    /// Returns `true` if this event ends a dispatch.
    #[must_use]
    pub fn is_outcome(&self) -> bool {
        !matches!(self, Self::Dispatched { .. })
    }

    /// Returns `true` if this event reports a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::TransportFailed { .. } | Self::Rejected { .. })
    }
}
