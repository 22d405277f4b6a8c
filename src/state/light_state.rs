// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory state mirrors.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, SwitchEvent, Trigger, TriggerOutput};

use super::{AccessoryContext, StateChange};

/// On/brightness mirror of a dimmable light.
///
/// Setting a brightness always derives the on-state from it: 0 means off,
/// anything else means on. Setting the on-state leaves brightness alone.
///
/// # Examples
///
/// ```
/// use switchbot_ir_light::state::LightState;
/// use switchbot_ir_light::types::Brightness;
///
/// let mut state = LightState::new();
/// state.set_brightness(Brightness::new(40).unwrap());
/// assert!(state.on());
///
/// state.set_brightness(Brightness::MIN);
/// assert!(!state.on());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    on: bool,
    brightness: Brightness,
}

impl LightState {
    /// Creates an off light at brightness 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the light is on.
    #[must_use]
    pub fn on(&self) -> bool {
        self.on
    }

    /// Returns the brightness.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Sets the on-state.
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Sets the brightness and derives the on-state from it.
    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
        self.on = brightness.implies_on();
    }
}

/// State of one momentary trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerState {
    /// Last event raised.
    pub event: SwitchEvent,
    /// Current output state.
    pub output: TriggerOutput,
}

/// Two momentary triggers of a stateless device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatelessSwitchState {
    on_trigger: TriggerState,
    off_trigger: TriggerState,
}

impl StatelessSwitchState {
    /// Creates both triggers idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of one trigger.
    #[must_use]
    pub fn trigger(&self, trigger: Trigger) -> TriggerState {
        match trigger {
            Trigger::On => self.on_trigger,
            Trigger::Off => self.off_trigger,
        }
    }

    /// Sets the output state of one trigger.
    pub fn set_output(&mut self, trigger: Trigger, output: TriggerOutput) {
        match trigger {
            Trigger::On => self.on_trigger.output = output,
            Trigger::Off => self.off_trigger.output = output,
        }
    }
}

/// State of one accessory: either a dimmable light or a pair of triggers.
///
/// The variant is chosen once from configuration and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessoryState {
    /// Dimmable light.
    Light(LightState),
    /// Stateless infrared blaster exposed as two triggers.
    Stateless(StatelessSwitchState),
}

impl AccessoryState {
    /// Creates the initial state, restoring from a persisted context if any.
    #[must_use]
    pub fn restore(stateless: bool, context: Option<&AccessoryContext>) -> Self {
        let context = context.cloned().unwrap_or_default();
        if stateless {
            let mut state = StatelessSwitchState::new();
            if let Some(output) = context.on_trigger {
                state.set_output(Trigger::On, output);
            }
            if let Some(output) = context.off_trigger {
                state.set_output(Trigger::Off, output);
            }
            Self::Stateless(state)
        } else {
            let mut state = LightState::new();
            if let Some(brightness) = context.brightness {
                state.brightness = brightness;
            }
            if let Some(on) = context.on {
                state.on = on;
            }
            Self::Light(state)
        }
    }

    /// Returns the light mirror, if this is a light.
    #[must_use]
    pub fn light(&self) -> Option<&LightState> {
        match self {
            Self::Light(state) => Some(state),
            Self::Stateless(_) => None,
        }
    }

    /// Returns the mutable light mirror, if this is a light.
    pub fn light_mut(&mut self) -> Option<&mut LightState> {
        match self {
            Self::Light(state) => Some(state),
            Self::Stateless(_) => None,
        }
    }

    /// Returns the trigger pair, if this is a stateless device.
    #[must_use]
    pub fn stateless(&self) -> Option<&StatelessSwitchState> {
        match self {
            Self::Stateless(state) => Some(state),
            Self::Light(_) => None,
        }
    }

    /// Returns the mutable trigger pair, if this is a stateless device.
    pub fn stateless_mut(&mut self) -> Option<&mut StatelessSwitchState> {
        match self {
            Self::Stateless(state) => Some(state),
            Self::Light(_) => None,
        }
    }

    /// Applies a state change and returns whether the state actually changed.
    ///
    /// Changes that do not belong to this kind of accessory are ignored.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        let before = *self;
        match (&mut *self, change) {
            (Self::Light(light), StateChange::On(on)) => light.set_on(*on),
            (Self::Light(light), StateChange::Light { on, brightness }) => {
                light.brightness = *brightness;
                light.on = *on;
            }
            (Self::Stateless(triggers), StateChange::Trigger { trigger, output }) => {
                triggers.set_output(*trigger, *output);
            }
            _ => {}
        }
        *self != before
    }
}
