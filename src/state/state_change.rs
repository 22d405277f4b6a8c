// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes describe what a successful dispatch committed. They are
//! applied to an [`AccessoryState`](super::AccessoryState), published on the
//! event bus, and decide which characteristics are pushed to the host.
//!
//! # Examples
//!
//! ```
//! use switchbot_ir_light::state::{AccessoryState, StateChange};
//! use switchbot_ir_light::types::Brightness;
//!
//! let mut state = AccessoryState::restore(false, None);
//!
//! // Apply returns true if state actually changed
//! let change = StateChange::Light {
//!     on: true,
//!     brightness: Brightness::new(75).unwrap(),
//! };
//! assert!(state.apply(&change));
//! assert!(!state.apply(&StateChange::On(true)));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Trigger, TriggerOutput};

/// A change committed after the API accepted a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateChange {
    /// Power state changed; brightness untouched.
    On(bool),

    /// Power and brightness set together by a brightness dispatch.
    Light {
        /// The new power state.
        on: bool,
        /// The new brightness.
        brightness: Brightness,
    },

    /// A trigger's output state changed.
    Trigger {
        /// Which trigger.
        trigger: Trigger,
        /// Its new output state.
        output: TriggerOutput,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let change = StateChange::Trigger {
            trigger: Trigger::Off,
            output: TriggerOutput::Active,
        };
        let json = serde_json::to_value(change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"trigger": {"trigger": "off", "output": 1}})
        );
    }

    #[test]
    fn light_change_round_trips_through_json() {
        let change = StateChange::Light {
            on: false,
            brightness: Brightness::MIN,
        };
        let json = serde_json::to_string(&change).unwrap();
        assert_eq!(json, r#"{"light":{"on":false,"brightness":0}}"#);
    }
}
