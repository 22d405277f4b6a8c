// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Momentary trigger types for stateless infrared devices.
//!
//! A stateless device has no retrievable power state, so it is exposed as
//! two momentary switches: one that sends "on" and one that sends "off".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Identifies one of the two momentary triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    /// Sends the turn-on command.
    On,
    /// Sends the turn-off command.
    Off,
}

impl Trigger {
    /// Returns the power intent this trigger carries.
    #[must_use]
    pub const fn target_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on-trigger"),
            Self::Off => f.write_str("off-trigger"),
        }
    }
}

/// Output state of a momentary trigger (0 or 1).
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::types::TriggerOutput;
///
/// assert_eq!(TriggerOutput::new(1).unwrap(), TriggerOutput::Active);
/// assert!(TriggerOutput::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TriggerOutput {
    /// Idle (0).
    #[default]
    Idle,
    /// Fired (1).
    Active,
}

impl TriggerOutput {
    /// Creates an output state from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidTriggerOutput` for anything but 0 or 1.
    pub const fn new(value: u8) -> Result<Self, ValueError> {
        match value {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Active),
            other => Err(ValueError::InvalidTriggerOutput(other)),
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Active => 1,
        }
    }
}

impl TryFrom<u8> for TriggerOutput {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TriggerOutput> for u8 {
    fn from(value: TriggerOutput) -> Self {
        value.value()
    }
}

/// Event raised by a programmable switch.
///
/// Infrared triggers only ever report a single press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwitchEvent {
    /// A single press.
    #[default]
    SinglePress,
}
