// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted accessory context.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{Brightness, Trigger, TriggerOutput};

use super::AccessoryState;

/// Values kept in the bridge's accessory-context store across restarts.
///
/// Only committed state is ever written here, so after a restart the UI
/// shows what the device last confirmed.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::state::AccessoryContext;
///
/// let context = AccessoryContext::from_json(r#"{"on": true, "brightness": 60}"#).unwrap();
/// assert_eq!(context.on, Some(true));
/// assert_eq!(context.brightness.unwrap().value(), 60);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryContext {
    /// Power state of a light.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    /// Brightness of a light.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,
    /// Output state of the on-trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_trigger: Option<TriggerOutput>,
    /// Output state of the off-trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_trigger: Option<TriggerOutput>,
}

impl AccessoryContext {
    /// Captures the persisted subset of a state.
    #[must_use]
    pub fn from_state(state: &AccessoryState) -> Self {
        match state {
            AccessoryState::Light(light) => Self {
                on: Some(light.on()),
                brightness: Some(light.brightness()),
                ..Self::default()
            },
            AccessoryState::Stateless(triggers) => Self {
                on_trigger: Some(triggers.trigger(Trigger::On).output),
                off_trigger: Some(triggers.trigger(Trigger::Off).output),
                ..Self::default()
            },
        }
    }

    /// Parses a context from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the JSON is malformed or a value is out
    /// of range.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serializes the context to JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ParseError> {
        serde_json::to_string(self).map_err(Into::into)
    }
}
